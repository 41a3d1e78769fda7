//! In-memory embedding cache.
//!
//! Keyed by the blake3 digest of the input text. Capacity is bounded in
//! bytes through a per-entry weigher, so the budget holds whatever the
//! configured dimensionality is.

use moka::sync::Cache;

/// Cache key: raw blake3 digest of the embedded text.
pub type TextDigest = [u8; 32];

pub struct EmbeddingCache {
    cache: Cache<TextDigest, Vec<f32>>,
}

impl EmbeddingCache {
    /// Create a cache bounded to roughly `max_bytes` of vector data.
    pub fn new(max_bytes: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_bytes)
            .weigher(|_key: &TextDigest, value: &Vec<f32>| {
                u32::try_from(value.len() * std::mem::size_of::<f32>()).unwrap_or(u32::MAX)
            })
            .build();
        Self { cache }
    }

    /// Content digest used as the cache key.
    pub fn key_for(text: &str) -> TextDigest {
        blake3::hash(text.as_bytes()).into()
    }

    pub fn get(&self, key: &TextDigest) -> Option<Vec<f32>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: TextDigest, embedding: Vec<f32>) {
        self.cache.insert(key, embedding);
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}
