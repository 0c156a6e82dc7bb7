use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Guarded execution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Per-statement timeout.
    pub statement_timeout_ms: u64,
    /// Hard ceiling on delivered rows.
    pub max_rows: usize,
    /// Number of pooled read-only connections (clamped to 1..=8).
    pub read_pool_size: usize,
    /// How long a request waits for a free connection.
    pub acquire_timeout_ms: u64,
    /// Replace literal values in database error messages.
    pub redact_error_literals: bool,
}

impl ExecutionConfig {
    pub fn statement_timeout(&self) -> Duration {
        Duration::from_millis(self.statement_timeout_ms)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_ms)
    }

    /// LIMIT injected by the guard: one sentinel row above the ceiling lets
    /// the executor report truncation.
    pub fn injected_limit(&self) -> u64 {
        self.max_rows as u64 + 1
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            statement_timeout_ms: defaults::DEFAULT_STATEMENT_TIMEOUT_MS,
            max_rows: defaults::DEFAULT_MAX_ROWS,
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
            acquire_timeout_ms: defaults::DEFAULT_ACQUIRE_TIMEOUT_MS,
            redact_error_literals: defaults::DEFAULT_REDACT_ERROR_LITERALS,
        }
    }
}
