//! # schemalink-agent
//!
//! The correction loop and the facade that wires it from configuration.
//!
//! ```text
//! Retrieving ─► Generating ─► Validating ─► Executing ─► Synthesizing ─► Done
//!                  ▲   │          │            │
//!                  └───┴──────────┴────────────┘  recoverable failure, budget left
//!                      any stage ─► Failed
//! ```

pub mod augmenter;
pub mod context;
pub mod correction_loop;
pub mod facade;
pub mod report;
pub mod state;

pub use augmenter::GlossaryAugmenter;
pub use context::RequestContext;
pub use correction_loop::{CorrectionLoop, LoopParts};
pub use facade::{SchemaLink, SchemaLinkOptions};
pub use report::LoopReport;
pub use state::Stage;
