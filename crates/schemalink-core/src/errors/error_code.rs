//! Stable error codes for every SchemaLink error.

/// Every error enum implements this to expose a machine-readable code
/// alongside its human-readable message.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "RETRIEVAL_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const RETRIEVAL_ERROR: &str = "RETRIEVAL_ERROR";
pub const GENERATION_ERROR: &str = "GENERATION_ERROR";
pub const ENGINE_ERROR: &str = "ENGINE_ERROR";
pub const EXECUTION_ERROR: &str = "EXECUTION_ERROR";
pub const EXECUTION_TIMEOUT: &str = "EXECUTION_TIMEOUT";
pub const SYNTHESIS_ERROR: &str = "SYNTHESIS_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const RETRY_BUDGET_EXHAUSTED: &str = "RETRY_BUDGET_EXHAUSTED";
pub const CANCELLED: &str = "CANCELLED";
pub const DEADLINE_EXCEEDED: &str = "DEADLINE_EXCEEDED";
