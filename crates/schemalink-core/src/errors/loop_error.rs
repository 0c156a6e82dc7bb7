use super::error_code::{self, ErrorCode};
use super::{RetrievalError, SynthesisError};

/// Terminal outcomes of the correction loop other than `Done`.
#[derive(Debug, thiserror::Error)]
pub enum LoopError {
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("retry budget exhausted after {attempts} attempts: {last_error}")]
    RetryBudgetExhausted { attempts: usize, last_error: String },

    #[error("synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("request cancelled while {stage}")]
    Cancelled { stage: String },

    #[error("request deadline exceeded while {stage}")]
    DeadlineExceeded { stage: String },
}

impl ErrorCode for LoopError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Retrieval(e) => e.error_code(),
            Self::RetryBudgetExhausted { .. } => error_code::RETRY_BUDGET_EXHAUSTED,
            Self::Synthesis(e) => e.error_code(),
            Self::Cancelled { .. } => error_code::CANCELLED,
            Self::DeadlineExceeded { .. } => error_code::DEADLINE_EXCEEDED,
        }
    }
}
