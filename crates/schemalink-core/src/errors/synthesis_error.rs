use super::error_code::{self, ErrorCode};
use super::EngineError;

/// Synthesis failures. Terminal: a valid result set already exists and a retry
/// would not change grounding.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("synthesis call failed: {0}")]
    Engine(#[from] EngineError),

    #[error("engine returned an empty answer")]
    EmptyAnswer,

    #[error("result set serialization failed: {reason}")]
    Serialization { reason: String },
}

impl ErrorCode for SynthesisError {
    fn error_code(&self) -> &'static str {
        error_code::SYNTHESIS_ERROR
    }
}
