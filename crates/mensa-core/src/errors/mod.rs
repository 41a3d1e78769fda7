//! Error taxonomy for the search core.
//!
//! Each subsystem has its own error enum; `MensaError` aggregates them
//! for callers that cross subsystem boundaries. Internal errors are
//! recovered by stage-local or pipeline-level fallback and never reach
//! the caller raw, except total backend unavailability.

mod agent_error;
mod index_error;
mod llm_error;

pub use agent_error::AgentError;
pub use index_error::IndexError;
pub use llm_error::LlmError;

/// Top-level error type aggregating all subsystems.
#[derive(Debug, thiserror::Error)]
pub enum MensaError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("embedding error: {reason}")]
    Embedding { reason: String },
}

/// Result alias used throughout the workspace.
pub type MensaResult<T> = Result<T, MensaError>;
