//! Configuration structs, deserializable from TOML with full defaults.
//!
//! Environment parsing is out of scope; the surrounding service builds a
//! `MensaConfig` and injects it at construction time.

mod index_config;
mod llm_config;
mod search_config;

pub use index_config::IndexConfig;
pub use llm_config::{LlmClientConfig, LlmProvider};
pub use search_config::SearchConfig;

use serde::{Deserialize, Serialize};

/// Top-level configuration for the search core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MensaConfig {
    pub search: SearchConfig,
    pub index: IndexConfig,
    /// Resolved LLM strategy. `None` means no credential was configured:
    /// every request runs the fused path.
    pub llm: Option<LlmClientConfig>,
}

impl MensaConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
