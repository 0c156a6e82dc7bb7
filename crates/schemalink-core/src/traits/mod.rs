//! Seams to every external collaborator.

mod database;
mod embedding;
mod observer;
mod reasoning_engine;
mod sanitizer;
mod schema_index;
mod tokenizer;

pub use database::{IReadOnlyDatabase, RawRows, StatementRequest};
pub use embedding::IEmbeddingProvider;
pub use observer::{IAttemptObserver, IContextAugmenter};
pub use reasoning_engine::{IReasoningEngine, StructuredResult, ToolCall, ToolSchema};
pub use sanitizer::{ISanitizer, Redaction, SanitizedText};
pub use schema_index::ISchemaIndex;
pub use tokenizer::ITokenizer;
