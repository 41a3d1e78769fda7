/// LLM transport and parse errors.
///
/// `Unavailable` means no credential was configured at construction
/// time; it is the signal that diverts the pipeline to the fused path.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("no LLM credential configured")]
    Unavailable,

    #[error("LLM call timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("malformed LLM output: {snippet}")]
    Malformed { snippet: String },
}
