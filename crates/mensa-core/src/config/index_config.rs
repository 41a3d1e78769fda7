use serde::{Deserialize, Serialize};

/// Relational/index backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Read pool size. Clamped to 2..=10 when the pool opens.
    pub read_pool_size: usize,
    /// SQLite busy_timeout, bounding relational waits per call.
    pub busy_timeout_ms: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            read_pool_size: 4,
            busy_timeout_ms: 5000,
        }
    }
}
