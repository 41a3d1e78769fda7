//! FTS5 keyword search returning BM25-ranked hits.
//!
//! The indexed fields are text, collection, cuisine, and category; the
//! UNINDEXED metadata column carries the full text-indexed metadata map
//! so keyword hits stand on their own without a relational join.

use rusqlite::{params, Connection};
use serde_json::Value;

use mensa_core::errors::IndexError;
use mensa_core::traits::KeywordHit;

use crate::to_index_err;

/// Build an FTS5 MATCH expression from free text: alphanumeric terms,
/// each quoted, OR-ed for recall. Returns `None` when no searchable
/// term remains.
pub fn build_match_query(terms: &str) -> Option<String> {
    let quoted: Vec<String> = terms
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| format!("\"{t}\""))
        .collect();
    if quoted.is_empty() {
        None
    } else {
        Some(quoted.join(" OR "))
    }
}

/// Search the keyword index. Hits come back ordered by BM25 relevance
/// descending (bm25() is smaller-is-better, so the score is negated).
pub fn search_keyword(
    conn: &Connection,
    terms: &str,
    top_k: usize,
) -> Result<Vec<KeywordHit>, IndexError> {
    let Some(match_query) = build_match_query(terms) else {
        return Ok(Vec::new());
    };

    let mut stmt = conn
        .prepare(
            "SELECT external_id, -bm25(documents_fts) AS score, metadata
             FROM documents_fts
             WHERE documents_fts MATCH ?1
             ORDER BY rank
             LIMIT ?2",
        )
        .map_err(|e| to_index_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![match_query, top_k as i64], |row| {
            let external_id: String = row.get(0)?;
            let score: f64 = row.get(1)?;
            let metadata_json: String = row.get(2)?;
            Ok((external_id, score, metadata_json))
        })
        .map_err(|e| to_index_err(e.to_string()))?;

    let mut hits = Vec::new();
    for row in rows {
        let (external_id, score, metadata_json) =
            row.map_err(|e| to_index_err(e.to_string()))?;
        let metadata = serde_json::from_str::<Value>(&metadata_json)
            .ok()
            .and_then(|v| v.as_object().cloned())
            .unwrap_or_default();
        hits.push(KeywordHit {
            external_id,
            score,
            metadata,
        });
    }
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_query_quotes_and_ors_terms() {
        assert_eq!(
            build_match_query("vegan tacos").as_deref(),
            Some("\"vegan\" OR \"tacos\"")
        );
    }

    #[test]
    fn match_query_strips_fts_syntax() {
        // Quotes/operators in user input must not reach FTS5 raw.
        assert_eq!(
            build_match_query("tacos AND \"burritos\"").as_deref(),
            Some("\"tacos\" OR \"AND\" OR \"burritos\"")
        );
    }

    #[test]
    fn match_query_empty_input() {
        assert_eq!(build_match_query("  !?  "), None);
    }
}
