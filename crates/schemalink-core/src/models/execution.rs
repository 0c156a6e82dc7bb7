use std::fmt;

use serde::{Deserialize, Serialize};

/// Rows delivered by a successful execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSuccess {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
    /// Never above the configured row ceiling.
    pub row_count: usize,
    /// True when the ceiling cut the result.
    pub truncated: bool,
}

impl ExecutionSuccess {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as column-name keyed records.
    pub fn records(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect::<serde_json::Map<_, _>>()
            })
            .collect()
    }
}

/// Why an execution failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    ExecutionError,
    Timeout,
    Cancelled,
}

impl FailureKind {
    /// Whether the correction loop may retry after this failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ExecutionError | Self::Timeout)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ExecutionError => "execution error",
            Self::Timeout => "timeout",
            Self::Cancelled => "cancelled",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionFailure {
    pub error_kind: FailureKind,
    pub message: String,
}

/// Result of one guarded execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    Success(ExecutionSuccess),
    Failure(ExecutionFailure),
}

impl ExecutionOutcome {
    pub fn failure(error_kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failure(ExecutionFailure {
            error_kind,
            message: message.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
