use serde_json::{Map, Value};

use crate::errors::IndexError;

/// One hit from the vector backend: the join key, cosine similarity,
/// and the payload mirror of the indexed metadata (used for the
/// degraded-join fallback when the relational row is missing).
#[derive(Debug, Clone)]
pub struct VectorHit {
    pub external_id: String,
    pub score: f64,
    pub payload: Map<String, Value>,
}

/// One hit from the keyword backend: join key, BM25 score, and the
/// text-indexed metadata (authoritative on fusion collisions).
#[derive(Debug, Clone)]
pub struct KeywordHit {
    pub external_id: String,
    pub score: f64,
    pub metadata: Map<String, Value>,
}

/// A full relational row: document fields joined with the owning
/// collection's fields, flattened.
#[derive(Debug, Clone)]
pub struct DocumentRecord {
    pub external_id: String,
    pub fields: Map<String, Value>,
}

/// Vector-similarity backend. Returns hits ordered by similarity
/// descending.
pub trait IVectorIndex: Send + Sync {
    fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<VectorHit>, IndexError>;
}

/// Inverted keyword index over a fixed set of text fields. Returns hits
/// ordered by BM25 relevance descending.
pub trait IKeywordIndex: Send + Sync {
    fn query(&self, terms: &str, top_k: usize) -> Result<Vec<KeywordHit>, IndexError>;
}

/// Relational store of document + collection metadata, keyed by
/// external_id.
pub trait IMetadataStore: Send + Sync {
    /// Batch fetch in a single round trip. Ids absent from the store are
    /// simply absent from the output; the caller degrades per-hit.
    fn fetch(&self, external_ids: &[String]) -> Result<Vec<DocumentRecord>, IndexError>;
}
