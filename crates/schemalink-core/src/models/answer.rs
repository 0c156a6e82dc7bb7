use serde::{Deserialize, Serialize};

/// Terminal artifact returned to the caller on `Done`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalAnswer {
    pub text: String,
    /// Present only when the request completed and SQL exposure is enabled.
    pub executed_sql: Option<String>,
    pub attempt_count: usize,
    /// The answer was built from a row set cut at the row ceiling.
    pub truncated: bool,
}
