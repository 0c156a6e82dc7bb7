use super::error_code::{self, ErrorCode};

/// Retrieval subsystem errors. Fatal for a request: the loop does not retry them.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("schema index unavailable: {reason}")]
    IndexUnavailable { reason: String },

    #[error("embedding failed: {reason}")]
    EmbeddingFailed { reason: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("duplicate chunk id: {chunk_id}")]
    DuplicateChunk { chunk_id: String },
}

impl ErrorCode for RetrievalError {
    fn error_code(&self) -> &'static str {
        error_code::RETRIEVAL_ERROR
    }
}
