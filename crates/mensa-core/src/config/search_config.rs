use serde::{Deserialize, Serialize};

use crate::constants;

/// Retrieval and fusion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// RRF smoothing constant.
    pub rrf_k: u32,
    /// Over-fetch factor per source before fusion.
    pub fetch_multiplier: usize,
    /// Default result count when the caller gives none.
    pub default_top_k: usize,
    /// Embedding dimensionality expected by the vector backend.
    pub vector_dimensions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            rrf_k: constants::DEFAULT_RRF_K,
            fetch_multiplier: constants::FUSION_FETCH_MULTIPLIER,
            default_top_k: constants::DEFAULT_TOP_K,
            vector_dimensions: constants::VECTOR_DIMENSIONS,
        }
    }
}
