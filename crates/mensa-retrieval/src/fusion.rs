//! Reciprocal Rank Fusion: score = Σ 1/(k + rank_i)
//!
//! Merges the vector and keyword result lists into a single ordering
//! without requiring score normalization across the two retrieval
//! methods. A document present in only one source is normal and
//! contributes nothing for the source it is absent from.

use std::collections::HashMap;

use mensa_core::models::SearchResult;
use mensa_core::traits::{KeywordHit, VectorHit};
use serde_json::{Map, Value};

/// Rank used for tie-breaking when a document is absent from a source.
const ABSENT_RANK: usize = usize::MAX;

struct FusedEntry {
    vector_rank: usize,
    keyword_rank: usize,
    metadata: Map<String, Value>,
}

/// Fuses two independently-scored, independently-backed ranked lists.
pub struct RankFusionEngine {
    k: u32,
}

impl RankFusionEngine {
    /// Create an engine with the given RRF smoothing constant.
    pub fn new(k: u32) -> Self {
        Self { k }
    }

    /// Merge vector and keyword hits via RRF.
    ///
    /// Ranks are 1-based per source by descending backend score, with a
    /// stable tie-break preserving the backend-returned order for equal
    /// scores. On metadata key collisions the keyword source wins (it is
    /// the authoritative text-indexed metadata). Output is sorted by
    /// fused score descending; ties break by vector rank, then keyword
    /// rank.
    pub fn fuse(&self, vector: Vec<VectorHit>, keyword: Vec<KeywordHit>) -> Vec<SearchResult> {
        let mut vector = vector;
        let mut keyword = keyword;
        // Stable: equal scores keep backend order.
        vector.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        keyword.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut entries: HashMap<String, FusedEntry> = HashMap::new();

        for (i, hit) in vector.into_iter().enumerate() {
            entries.insert(
                hit.external_id,
                FusedEntry {
                    vector_rank: i + 1,
                    keyword_rank: ABSENT_RANK,
                    metadata: hit.payload,
                },
            );
        }

        for (i, hit) in keyword.into_iter().enumerate() {
            let entry = entries.entry(hit.external_id).or_insert(FusedEntry {
                vector_rank: ABSENT_RANK,
                keyword_rank: ABSENT_RANK,
                metadata: Map::new(),
            });
            entry.keyword_rank = i + 1;
            // Keyword-source metadata overwrites on collision.
            for (key, value) in hit.metadata {
                entry.metadata.insert(key, value);
            }
        }

        let k = self.k as f64;
        let mut fused: Vec<(FusedEntry, SearchResult)> = entries
            .into_iter()
            .map(|(id, entry)| {
                let mut score = 0.0;
                if entry.vector_rank != ABSENT_RANK {
                    score += 1.0 / (k + entry.vector_rank as f64);
                }
                if entry.keyword_rank != ABSENT_RANK {
                    score += 1.0 / (k + entry.keyword_rank as f64);
                }
                let result = SearchResult {
                    id,
                    score,
                    metadata: Map::new(),
                };
                (entry, result)
            })
            .collect();

        fused.sort_by(|(ea, ra), (eb, rb)| {
            rb.score
                .partial_cmp(&ra.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(ea.vector_rank.cmp(&eb.vector_rank))
                .then(ea.keyword_rank.cmp(&eb.keyword_rank))
        });

        fused
            .into_iter()
            .map(|(entry, mut result)| {
                result.metadata = entry.metadata;
                result
            })
            .collect()
    }
}
