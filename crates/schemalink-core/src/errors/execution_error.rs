use super::error_code::{self, ErrorCode};

/// Errors reported by the read-only database collaborator.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("statement exceeded timeout of {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("no read connection became free within {waited_ms}ms")]
    PoolExhausted { waited_ms: u64 },

    #[error("statement cancelled")]
    Cancelled,

    #[error("statement is not read-only")]
    NotReadOnly,

    #[error("connection failure: {reason}")]
    Connection { reason: String },

    #[error("{message}")]
    Statement { message: String },
}

impl ErrorCode for ExecutionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } | Self::PoolExhausted { .. } => error_code::EXECUTION_TIMEOUT,
            Self::Cancelled => error_code::CANCELLED,
            _ => error_code::EXECUTION_ERROR,
        }
    }
}
