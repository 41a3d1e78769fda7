//! EmbeddingEngine — the main entry point for mensa-embeddings.
//!
//! Wraps the deterministic provider with a cache tier. Implements
//! `IEmbeddingProvider` so it can be injected anywhere a provider is
//! expected.

use mensa_core::errors::MensaResult;
use mensa_core::traits::IEmbeddingProvider;
use tracing::{debug, info};

use crate::cache::EmbeddingCache;
use crate::provider::HashedTermFrequency;

/// Default cache budget in bytes of vector data (a few thousand
/// 384-dim vectors).
const DEFAULT_CACHE_BYTES: u64 = 8 * 1024 * 1024;

/// Provider + cache facade.
pub struct EmbeddingEngine {
    provider: HashedTermFrequency,
    cache: EmbeddingCache,
    dimensions: usize,
}

impl EmbeddingEngine {
    /// Create an engine producing vectors of the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        info!(dims = dimensions, "embedding engine initialized");
        Self {
            provider: HashedTermFrequency::new(dimensions),
            cache: EmbeddingCache::new(DEFAULT_CACHE_BYTES),
            dimensions,
        }
    }

    /// Embed a query string, consulting the cache first.
    pub fn embed_query(&self, query: &str) -> MensaResult<Vec<f32>> {
        let key = EmbeddingCache::key_for(query);
        if let Some(cached) = self.cache.get(&key) {
            debug!(query_len = query.len(), "embedding cache hit");
            return Ok(cached);
        }
        let embedding = self.provider.embed(query)?;
        self.cache.insert(key, embedding.clone());
        Ok(embedding)
    }
}

impl IEmbeddingProvider for EmbeddingEngine {
    fn embed(&self, text: &str) -> MensaResult<Vec<f32>> {
        self.embed_query(text)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "mensa-embedding-engine"
    }
}
