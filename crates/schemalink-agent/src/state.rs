//! Correction loop states.

use std::fmt;

use serde::{Deserialize, Serialize};

use schemalink_core::errors::LoopError;
use schemalink_core::models::{AttemptRecord, ExecutionSuccess, FinalAnswer};
use schemalink_observability::tracing_setup::spans::names;

/// Where a request is, without the data the state carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Retrieving,
    Generating,
    Validating,
    Executing,
    Synthesizing,
    Done,
    Failed,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retrieving => names::STAGE_RETRIEVING,
            Self::Generating => names::STAGE_GENERATING,
            Self::Validating => names::STAGE_VALIDATING,
            Self::Executing => names::STAGE_EXECUTING,
            Self::Synthesizing => names::STAGE_SYNTHESIZING,
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A state together with what it needs to proceed. The attempt in flight
/// travels with `Validating` and `Executing` so it is never lost.
#[derive(Debug)]
pub(crate) enum LoopState {
    Retrieving,
    Generating,
    Validating(AttemptRecord),
    Executing(AttemptRecord),
    Synthesizing {
        success: ExecutionSuccess,
        executed_sql: String,
    },
    Done(FinalAnswer),
    Failed(LoopError),
}

impl LoopState {
    pub(crate) fn stage(&self) -> Stage {
        match self {
            Self::Retrieving => Stage::Retrieving,
            Self::Generating => Stage::Generating,
            Self::Validating(_) => Stage::Validating,
            Self::Executing(_) => Stage::Executing,
            Self::Synthesizing { .. } => Stage::Synthesizing,
            Self::Done(_) => Stage::Done,
            Self::Failed(_) => Stage::Failed,
        }
    }

    /// The attempt in flight, if this state carries one.
    pub(crate) fn into_pending_attempt(self) -> Option<AttemptRecord> {
        match self {
            Self::Validating(a) | Self::Executing(a) => Some(a),
            _ => None,
        }
    }
}
