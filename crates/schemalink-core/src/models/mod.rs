//! Request-scoped data model. Everything except `SchemaChunk` lives for one
//! request only.

pub mod answer;
pub mod attempt;
pub mod candidate;
pub mod dialect;
pub mod execution;
pub mod prompt;
pub mod retrieval;
pub mod schema;
pub mod validation;

pub use answer::FinalAnswer;
pub use attempt::AttemptRecord;
pub use candidate::SqlCandidate;
pub use dialect::SqlDialect;
pub use execution::{ExecutionFailure, ExecutionOutcome, ExecutionSuccess, FailureKind};
pub use prompt::Prompt;
pub use retrieval::{RankedHit, RetrievalBundle};
pub use schema::{ColumnSchema, ForeignKey, SchemaChunk, TableSchema};
pub use validation::{ValidationVerdict, Violation, ViolationKind};
