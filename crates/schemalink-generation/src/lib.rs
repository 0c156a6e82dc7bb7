//! # schemalink-generation
//!
//! Turns a question plus retrieved schema context into a prompt, asks the
//! reasoning engine for exactly one `generate_sql` tool call, and parses it
//! into a [`SqlCandidate`](schemalink_core::SqlCandidate).
//!
//! Prompts are rendered from immutable template segments with enumerated
//! slots; nothing is formatted into a template at runtime.

pub mod engine;
pub mod generator;
pub mod prompt;
pub mod tool;

pub use engine::{OpenAiCompatibleEngine, OpenAiEngineConfig};
pub use generator::StructuredGenerator;
pub use prompt::PromptAssembler;
pub use tool::sql_tool_schema;
