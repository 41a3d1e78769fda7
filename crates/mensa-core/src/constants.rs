/// Mensa system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Dimensionality of catalog embeddings. Fixed by the embedding model
/// version; the vector backend rejects mismatched dimensions.
pub const VECTOR_DIMENSIONS: usize = 384;

/// Default RRF smoothing constant. Higher values reduce the influence
/// of top-ranked items from any single retrieval source.
pub const DEFAULT_RRF_K: u32 = 60;

/// Default number of results returned by a search request.
pub const DEFAULT_TOP_K: usize = 10;

/// Each retrieval source is over-fetched by this factor before fusion
/// so that RRF has enough overlap to merge.
pub const FUSION_FETCH_MULTIPLIER: usize = 2;

/// Temperature used for all structured LLM calls (reproducibility).
pub const LLM_TEMPERATURE: f32 = 0.1;

/// Upper bound of the relevance scale produced by the ranker.
pub const MAX_RELEVANCE_SCORE: f64 = 10.0;
