use std::time::{Duration, Instant};

use crate::cancellation::CancellationToken;
use crate::errors::ExecutionError;
use crate::models::SqlDialect;

/// Per-statement execution limits.
#[derive(Debug, Clone)]
pub struct StatementRequest {
    pub timeout: Duration,
    /// Stop reading after this many rows.
    pub fetch_limit: usize,
    pub cancel: CancellationToken,
    /// Overall request deadline. Bounds waiting for a connection as well as
    /// the statement itself.
    pub deadline: Option<Instant>,
}

impl StatementRequest {
    pub fn new(timeout: Duration, fetch_limit: usize) -> Self {
        Self {
            timeout,
            fetch_limit,
            cancel: CancellationToken::new(),
            deadline: None,
        }
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// `limit`, shortened to whatever is left before the deadline.
    pub fn bounded(&self, limit: Duration) -> Duration {
        match self.deadline {
            Some(deadline) => limit.min(deadline.saturating_duration_since(Instant::now())),
            None => limit,
        }
    }
}

/// Raw rows as read from the driver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRows {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

/// A database reachable only through read-only credentials.
pub trait IReadOnlyDatabase: Send + Sync {
    fn execute(&self, statement: &str, request: &StatementRequest)
        -> Result<RawRows, ExecutionError>;

    /// Dialect the engine natively speaks.
    fn dialect(&self) -> SqlDialect;
}
