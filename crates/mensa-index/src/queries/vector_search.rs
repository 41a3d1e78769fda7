//! Vector similarity search over stored embeddings.
//!
//! Brute-force cosine scan in Rust over the `document_vectors` table.
//! Each hit carries the JSON payload mirror so the join layer can
//! degrade to payload-only metadata when the relational row is missing.

use rusqlite::Connection;
use serde_json::Value;

use mensa_core::errors::IndexError;
use mensa_core::traits::VectorHit;

use crate::to_index_err;

/// Search by cosine similarity, descending. Rows with mismatched
/// dimensions are skipped without deserializing the full vector.
pub fn search_vector(
    conn: &Connection,
    query_embedding: &[f32],
    top_k: usize,
) -> Result<Vec<VectorHit>, IndexError> {
    let query_norm_sq: f64 = query_embedding
        .iter()
        .map(|x| (*x as f64) * (*x as f64))
        .sum();
    if query_norm_sq == 0.0 {
        return Ok(Vec::new());
    }
    let query_len = query_embedding.len();

    let mut stmt = conn
        .prepare("SELECT external_id, embedding, dimensions, payload FROM document_vectors")
        .map_err(|e| to_index_err(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            let external_id: String = row.get(0)?;
            let blob: Vec<u8> = row.get(1)?;
            let dims: i64 = row.get(2)?;
            let payload: String = row.get(3)?;
            Ok((external_id, blob, dims, payload))
        })
        .map_err(|e| to_index_err(e.to_string()))?;

    let mut hits: Vec<VectorHit> = Vec::new();
    for row in rows {
        let (external_id, blob, dims, payload_json) =
            row.map_err(|e| to_index_err(e.to_string()))?;
        if dims as usize != query_len {
            continue;
        }
        let stored = bytes_to_f32_vec(&blob, dims as usize);
        let score = cosine_similarity(query_embedding, &stored);
        if score <= 0.0 {
            continue;
        }
        let payload = serde_json::from_str::<Value>(&payload_json)
            .ok()
            .and_then(|v| v.as_object().cloned())
            .unwrap_or_default();
        hits.push(VectorHit {
            external_id,
            score,
            payload,
        });
    }

    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    hits.truncate(top_k);
    Ok(hits)
}

/// Store (or replace) a document's embedding and payload mirror.
pub fn store_vector(
    conn: &Connection,
    external_id: &str,
    embedding: &[f32],
    payload: &serde_json::Map<String, Value>,
) -> Result<(), IndexError> {
    let blob = f32_vec_to_bytes(embedding);
    let payload_json = Value::Object(payload.clone()).to_string();
    conn.execute(
        "INSERT INTO document_vectors (external_id, embedding, dimensions, payload)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(external_id) DO UPDATE SET
            embedding = excluded.embedding,
            dimensions = excluded.dimensions,
            payload = excluded.payload",
        rusqlite::params![external_id, blob, embedding.len() as i64, payload_json],
    )
    .map_err(|e| to_index_err(e.to_string()))?;
    Ok(())
}

/// Convert f32 slice to bytes (little-endian).
fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert bytes back to f32 vec.
fn bytes_to_f32_vec(bytes: &[u8], expected_dims: usize) -> Vec<f32> {
    let mut result = Vec::with_capacity(expected_dims);
    for chunk in bytes.chunks_exact(4) {
        result.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    result
}

/// Cosine similarity between two vectors.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum();
    let norm_a: f64 = a
        .iter()
        .map(|x| (*x as f64) * (*x as f64))
        .sum::<f64>()
        .sqrt();
    let norm_b: f64 = b
        .iter()
        .map(|x| (*x as f64) * (*x as f64))
        .sum::<f64>()
        .sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
