use std::future::Future;

use crate::errors::LlmError;

/// Chat-completion client.
///
/// Implementations resolve their provider strategy at construction; a
/// client built without a credential reports unavailable and fails every
/// call with `LlmError::Unavailable`, which the pipeline treats as the
/// signal to take the fused path.
pub trait ILlmClient: Send + Sync {
    /// One chat completion. May fail with timeout / provider /
    /// unavailable conditions.
    fn complete(
        &self,
        prompt: &str,
        temperature: f32,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;

    /// Whether a credential is configured.
    fn is_available(&self) -> bool;

    /// Human-readable client name (provider/model).
    fn name(&self) -> &str;
}
