//! OpenAI-compatible chat-completion transport.
//!
//! The provider strategy (DeepSeek preferred, OpenAI fallback) is
//! resolved into an `LlmClientConfig` before this client is built; a
//! client constructed without a config is a permanent
//! `LlmError::Unavailable`, which the coordinator treats as the signal
//! to take the fused path.

use std::time::Duration;

use mensa_core::config::LlmClientConfig;
use mensa_core::errors::LlmError;
use mensa_core::traits::ILlmClient;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

pub struct ChatCompletionsClient {
    config: Option<LlmClientConfig>,
    http: reqwest::Client,
    label: String,
}

impl ChatCompletionsClient {
    /// Build a client from a resolved provider strategy, or a permanently
    /// unavailable one when no credential was configured.
    pub fn new(config: Option<LlmClientConfig>) -> Self {
        let label = match &config {
            Some(c) => format!("{:?}/{}", c.provider, c.model_name),
            None => "unconfigured".to_string(),
        };
        let timeout = config.as_ref().map_or(30, |c| c.timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .unwrap_or_default();
        Self {
            config,
            http,
            label,
        }
    }

    async fn send(&self, config: &LlmClientConfig, prompt: &str, temperature: f32) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        let request = ChatRequest {
            model: &config.model_name,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
        };
        let request_id = Uuid::new_v4();
        debug!(%request_id, model = %config.model_name, "sending chat completion");

        let call = self
            .http
            .post(&url)
            .bearer_auth(&config.api_key)
            .header("x-request-id", request_id.to_string())
            .json(&request)
            .send();

        let response = tokio::time::timeout(Duration::from_secs(config.timeout_secs), call)
            .await
            .map_err(|_| LlmError::Timeout {
                seconds: config.timeout_secs,
            })?
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout {
                        seconds: config.timeout_secs,
                    }
                } else {
                    LlmError::Provider {
                        status: 0,
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(%request_id, %status, "chat completion failed");
            return Err(LlmError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response.json().await.map_err(|e| LlmError::Malformed {
            snippet: e.to_string(),
        })?;
        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::Malformed {
                snippet: "response carried no choices".to_string(),
            })
    }
}

impl ILlmClient for ChatCompletionsClient {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, LlmError> {
        match &self.config {
            Some(config) => self.send(config, prompt, temperature).await,
            None => Err(LlmError::Unavailable),
        }
    }

    fn is_available(&self) -> bool {
        self.config.is_some()
    }

    fn name(&self) -> &str {
        &self.label
    }
}
