use serde::{Deserialize, Serialize};

use crate::constants;

/// Supported chat-completion providers. Both speak the same
/// OpenAI-compatible wire format; only model name and base URL differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    DeepSeek,
    OpenAi,
}

/// Resolved LLM strategy, decided once at construction time and injected
/// into every stage. Credential-dependent branching never happens at
/// request time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmClientConfig {
    pub provider: LlmProvider,
    pub model_name: String,
    pub base_url: String,
    pub api_key: String,
    /// Temperature for structured calls.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Per-call timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_temperature() -> f32 {
    constants::LLM_TEMPERATURE
}

fn default_timeout_secs() -> u64 {
    30
}

impl LlmClientConfig {
    /// Resolve the provider strategy from available credentials:
    /// DeepSeek preferred, OpenAI as fallback, `None` when neither key
    /// is set (the pipeline then always takes the fused path).
    pub fn resolve(
        deepseek_api_key: Option<String>,
        openai_api_key: Option<String>,
    ) -> Option<Self> {
        if let Some(key) = deepseek_api_key.filter(|k| !k.is_empty()) {
            return Some(Self {
                provider: LlmProvider::DeepSeek,
                model_name: "deepseek-chat".to_string(),
                base_url: "https://api.deepseek.com".to_string(),
                api_key: key,
                temperature: default_temperature(),
                timeout_secs: default_timeout_secs(),
            });
        }
        if let Some(key) = openai_api_key.filter(|k| !k.is_empty()) {
            return Some(Self {
                provider: LlmProvider::OpenAi,
                model_name: "gpt-3.5-turbo".to_string(),
                base_url: "https://api.openai.com/v1".to_string(),
                api_key: key,
                temperature: default_temperature(),
                timeout_secs: default_timeout_secs(),
            });
        }
        None
    }
}
