/// Agent pipeline errors. Any of these triggers the coordinator's
/// FALLBACK transition to the fused search path.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("stage {stage} failed: {reason}")]
    StageFailed { stage: String, reason: String },
}

impl AgentError {
    /// Build a stage failure from any displayable cause.
    pub fn stage(stage: &str, cause: impl std::fmt::Display) -> Self {
        Self::StageFailed {
            stage: stage.to_string(),
            reason: cause.to_string(),
        }
    }
}
