use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ExecutionOutcome, SqlCandidate, ValidationVerdict};

/// One generation attempt inside a request. Append-only, request-scoped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// 0-based.
    pub attempt_index: usize,
    pub started_at: DateTime<Utc>,
    pub candidate: Option<SqlCandidate>,
    /// Set when the engine output did not yield a candidate.
    pub generation_error: Option<String>,
    pub verdict: Option<ValidationVerdict>,
    pub outcome: Option<ExecutionOutcome>,
    pub generation_latency_ms: u64,
    pub execution_latency_ms: Option<u64>,
}

impl AttemptRecord {
    pub fn new(attempt_index: usize) -> Self {
        Self {
            attempt_index,
            started_at: Utc::now(),
            candidate: None,
            generation_error: None,
            verdict: None,
            outcome: None,
            generation_latency_ms: 0,
            execution_latency_ms: None,
        }
    }

    /// The statement that was (or would have been) executed.
    pub fn statement(&self) -> Option<&str> {
        self.verdict
            .as_ref()
            .map(|v| v.candidate.raw_statement.as_str())
            .or_else(|| self.candidate.as_ref().map(|c| c.raw_statement.as_str()))
    }

    /// Why this attempt failed, if it did.
    pub fn failure_detail(&self) -> Option<String> {
        if let Some(err) = &self.generation_error {
            return Some(format!("generation failed: {err}"));
        }
        if let Some(verdict) = &self.verdict {
            if !verdict.is_safe {
                return Some(format!(
                    "validation rejected the statement: {}",
                    verdict.summary()
                ));
            }
        }
        match &self.outcome {
            Some(ExecutionOutcome::Failure(failure)) => Some(failure.message.clone()),
            _ => None,
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, Some(ExecutionOutcome::Success(_)))
    }
}
