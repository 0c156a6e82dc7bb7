//! Error handling for SchemaLink.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod engine_error;
pub mod error_code;
pub mod execution_error;
pub mod generation_error;
pub mod loop_error;
pub mod retrieval_error;
pub mod synthesis_error;

pub use config_error::ConfigError;
pub use engine_error::EngineError;
pub use error_code::ErrorCode;
pub use execution_error::ExecutionError;
pub use generation_error::GenerationError;
pub use loop_error::LoopError;
pub use retrieval_error::RetrievalError;
pub use synthesis_error::SynthesisError;

/// Umbrella error aggregating subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum SchemaLinkError {
    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Request failed: {0}")]
    Loop(#[from] LoopError),
}

impl ErrorCode for SchemaLinkError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Retrieval(e) => e.error_code(),
            Self::Generation(e) => e.error_code(),
            Self::Engine(e) => e.error_code(),
            Self::Execution(e) => e.error_code(),
            Self::Synthesis(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Loop(e) => e.error_code(),
        }
    }
}

pub type SchemaLinkResult<T> = Result<T, SchemaLinkError>;
