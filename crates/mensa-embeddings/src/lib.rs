//! # mensa-embeddings
//!
//! Deterministic text → fixed-dimension vector transform, shared by
//! ingestion and query time. Provides a signed feature-hashing provider
//! and an engine facade with an L1 cache.

pub mod cache;
pub mod engine;
pub mod provider;

pub use engine::EmbeddingEngine;
pub use provider::HashedTermFrequency;
