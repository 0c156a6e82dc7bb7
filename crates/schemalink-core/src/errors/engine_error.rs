use super::error_code::{self, ErrorCode};

/// Failures talking to the external reasoning engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("transport failure: {reason}")]
    Transport { reason: String },

    #[error("provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("malformed provider response: {reason}")]
    MalformedResponse { reason: String },

    #[error("provider unavailable: {provider}")]
    Unavailable { provider: String },
}

impl ErrorCode for EngineError {
    fn error_code(&self) -> &'static str {
        error_code::ENGINE_ERROR
    }
}
