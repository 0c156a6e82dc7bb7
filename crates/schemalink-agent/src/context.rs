//! Per-request cancellation and deadline.

use std::time::{Duration, Instant};

use schemalink_core::errors::LoopError;
use schemalink_core::CancellationToken;

/// What the caller can do to a running request: cancel it, or give it an
/// overall deadline. Checked at every state transition and handed to the
/// executor so an in-flight statement is interrupted too.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub cancel: CancellationToken,
    pub deadline: Option<Instant>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deadline `budget` from now.
    pub fn with_timeout(budget: Duration) -> Self {
        Self {
            cancel: CancellationToken::new(),
            deadline: Some(Instant::now() + budget),
        }
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// `Err` when the request must stop before entering `stage`.
    /// Cancellation wins over an expired deadline.
    pub fn check(&self, stage: &str) -> Result<(), LoopError> {
        if self.cancel.is_cancelled() {
            return Err(LoopError::Cancelled {
                stage: stage.to_string(),
            });
        }
        if self.is_expired() {
            return Err(LoopError::DeadlineExceeded {
                stage: stage.to_string(),
            });
        }
        Ok(())
    }
}
