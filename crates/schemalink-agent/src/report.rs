//! What a request leaves behind.

use uuid::Uuid;

use schemalink_core::errors::LoopError;
use schemalink_core::models::{AttemptRecord, FinalAnswer};

use crate::state::Stage;

/// Outcome of one request plus everything recorded on the way.
///
/// Every attempt is kept, successful or not. `executed_sql` on the answer is
/// only ever present when `result` is `Ok`.
#[derive(Debug)]
pub struct LoopReport {
    pub request_id: Uuid,
    pub result: Result<FinalAnswer, LoopError>,
    pub attempts: Vec<AttemptRecord>,
    /// States entered, in order.
    pub stages: Vec<Stage>,
    pub retrieval_latency_ms: u64,
    pub total_latency_ms: u64,
}

impl LoopReport {
    pub fn is_done(&self) -> bool {
        self.result.is_ok()
    }

    pub fn answer(&self) -> Option<&FinalAnswer> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&LoopError> {
        self.result.as_ref().err()
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.len()
    }

    pub fn final_stage(&self) -> Stage {
        if self.is_done() {
            Stage::Done
        } else {
            Stage::Failed
        }
    }

    /// Failure detail of the most recent failed attempt.
    pub fn last_failure_detail(&self) -> Option<String> {
        self.attempts.iter().rev().find_map(AttemptRecord::failure_detail)
    }
}
