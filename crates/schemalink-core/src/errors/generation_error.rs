use super::error_code::{self, ErrorCode};
use super::EngineError;

/// The engine's output did not conform to the SQL tool contract.
/// Recoverable: the correction loop retries with the message as context.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("reasoning engine call failed: {0}")]
    Engine(#[from] EngineError),

    #[error("engine answered with free text instead of a tool call: {excerpt}")]
    FreeTextResponse { excerpt: String },

    #[error("engine returned no candidate statement")]
    NoCandidates,

    #[error("engine called unknown tool `{name}`")]
    UnknownTool { name: String },

    #[error("tool arguments missing required field `{field}`")]
    MissingField { field: String },

    #[error("tool argument `{field}` has wrong type: expected {expected}")]
    WrongType { field: String, expected: String },

    #[error("tool argument `statement` is empty")]
    EmptyStatement,
}

impl ErrorCode for GenerationError {
    fn error_code(&self) -> &'static str {
        error_code::GENERATION_ERROR
    }
}
