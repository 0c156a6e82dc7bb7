//! GuardedExecutor: time-bounded, row-capped execution of validated statements.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use schemalink_core::config::ExecutionConfig;
use schemalink_core::errors::ExecutionError;
use schemalink_core::models::{ExecutionSuccess, FailureKind};
use schemalink_core::traits::{IReadOnlyDatabase, StatementRequest};
use schemalink_core::{CancellationToken, ExecutionOutcome, SqlCandidate};
use schemalink_privacy::LiteralRedactor;

/// Executes statements that already passed the guard.
///
/// The row ceiling here is independent of any LIMIT the guard injected: the
/// database is asked for one row past the ceiling and anything beyond the
/// ceiling is dropped with `truncated = true`.
pub struct GuardedExecutor {
    database: Arc<dyn IReadOnlyDatabase>,
    config: ExecutionConfig,
    redactor: Option<LiteralRedactor>,
}

impl GuardedExecutor {
    /// Literal redaction follows `config.redact_error_literals`.
    pub fn new(database: Arc<dyn IReadOnlyDatabase>, config: ExecutionConfig) -> Self {
        let redactor = config.redact_error_literals.then(LiteralRedactor::new);
        Self {
            database,
            config,
            redactor,
        }
    }

    /// Replace the redaction policy.
    pub fn with_redactor(mut self, redactor: Option<LiteralRedactor>) -> Self {
        self.redactor = redactor;
        self
    }

    pub fn max_rows(&self) -> usize {
        self.config.max_rows
    }

    pub fn statement_timeout(&self) -> Duration {
        self.config.statement_timeout()
    }

    /// Run `candidate` with the given statement timeout.
    pub fn execute(&self, candidate: &SqlCandidate, timeout: Duration) -> ExecutionOutcome {
        self.execute_with(candidate, timeout, &CancellationToken::new(), None)
    }

    /// Run `candidate` on behalf of a request that can be cancelled and may
    /// carry an overall deadline.
    pub fn execute_with(
        &self,
        candidate: &SqlCandidate,
        timeout: Duration,
        cancel: &CancellationToken,
        deadline: Option<Instant>,
    ) -> ExecutionOutcome {
        let max_rows = self.config.max_rows;
        let request = StatementRequest::new(timeout, max_rows.saturating_add(1))
            .with_cancel(cancel.clone())
            .with_deadline(deadline);

        if candidate.dialect != self.database.dialect() {
            debug!(
                candidate = %candidate.dialect,
                database = %self.database.dialect(),
                "candidate dialect differs from database dialect"
            );
        }
        debug!(sql = %candidate.raw_statement, "executing statement");

        match self.database.execute(&candidate.raw_statement, &request) {
            Ok(raw) => {
                let mut rows = raw.rows;
                let truncated = rows.len() > max_rows;
                rows.truncate(max_rows);
                if truncated {
                    info!(max_rows, "result truncated at row ceiling");
                }
                ExecutionOutcome::Success(ExecutionSuccess {
                    columns: raw.columns,
                    row_count: rows.len(),
                    rows,
                    truncated,
                })
            }
            Err(err) => self.failure(err),
        }
    }

    fn failure(&self, err: ExecutionError) -> ExecutionOutcome {
        let kind = match &err {
            ExecutionError::Timeout { .. } | ExecutionError::PoolExhausted { .. } => {
                FailureKind::Timeout
            }
            ExecutionError::Cancelled => FailureKind::Cancelled,
            _ => FailureKind::ExecutionError,
        };
        let message = match &self.redactor {
            Some(redactor) => redactor.redact(&err.to_string()),
            None => err.to_string(),
        };
        warn!(kind = %kind, error = %message, "execution failed");
        ExecutionOutcome::failure(kind, message)
    }
}
