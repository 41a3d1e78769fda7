//! # mensa-retrieval
//!
//! The retrieval-fusion layer: Reciprocal Rank Fusion over the vector
//! and keyword backends, pure post-merge filters, the vector/metadata
//! join with degraded-join fallback, and the fused hybrid path the
//! pipeline falls back to.

pub mod filters;
pub mod fusion;
pub mod hybrid;
pub mod semantic;

pub use fusion::RankFusionEngine;
pub use hybrid::HybridSearcher;
pub use semantic::SemanticSearcher;
