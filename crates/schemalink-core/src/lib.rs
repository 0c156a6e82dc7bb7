//! # schemalink-core
//!
//! Foundation crate for SchemaLink.
//! Defines the request-scoped data model, the traits every external collaborator
//! implements, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod cancellation;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use cancellation::CancellationToken;
pub use config::SchemaLinkConfig;
pub use errors::{SchemaLinkError, SchemaLinkResult};
pub use models::{
    AttemptRecord, ExecutionOutcome, FinalAnswer, RetrievalBundle, SchemaChunk, SqlCandidate,
    SqlDialect, ValidationVerdict,
};
