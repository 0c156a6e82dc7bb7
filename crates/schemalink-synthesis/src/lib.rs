//! # schemalink-synthesis
//!
//! SynthesisGuard: turns a successful row set into the final answer. The
//! engine is told to state only what the rows show, its answer is checked
//! against the rows, and both the rows it sees and the text it returns are
//! scrubbed of sensitive values.

pub mod grounding;
pub mod guard;
pub mod table;

pub use grounding::{GroundingReport, GroundingVerifier};
pub use guard::SynthesisGuard;
