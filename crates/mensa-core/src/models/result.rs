use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A retrieval candidate flowing through the pipeline.
///
/// `score` is backend-native: cosine similarity on the vector-only path,
/// the fused RRF value after rank fusion. `metadata` is a superset of
/// document + collection fields. Request-scoped; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The document's external_id.
    pub id: String,
    pub score: f64,
    pub metadata: Map<String, Value>,
}

impl SearchResult {
    /// String view of a metadata field ("" when absent or non-string).
    pub fn meta_str(&self, key: &str) -> &str {
        self.metadata.get(key).and_then(Value::as_str).unwrap_or("")
    }

    /// Numeric view of a metadata field, coercing integers and numeric
    /// strings to f64.
    pub fn meta_f64(&self, key: &str) -> Option<f64> {
        self.metadata.get(key).and_then(super::metadata::coerce_f64)
    }
}

/// A scored result after the ranking stage. Final rank is array position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResult {
    pub id: String,
    pub score: f64,
    pub metadata: Map<String, Value>,
    /// 0–10 relevance against the original query.
    pub relevance_score: f64,
}

impl RankedResult {
    /// Shape a fused-path result as a ranked result.
    /// The fused path has no LLM scores; scale the fused score instead.
    pub fn from_fused(result: SearchResult) -> Self {
        Self {
            relevance_score: result.score * crate::constants::MAX_RELEVANCE_SCORE,
            id: result.id,
            score: result.score,
            metadata: result.metadata,
        }
    }
}
