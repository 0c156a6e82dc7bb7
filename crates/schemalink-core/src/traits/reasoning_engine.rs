use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::models::Prompt;

/// A function-call schema offered to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    /// JSON Schema of the arguments object.
    pub parameters: serde_json::Value,
}

/// One tool invocation returned by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    pub arguments: serde_json::Value,
}

/// What the engine sent back for a structured request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredResult {
    pub tool_calls: Vec<ToolCall>,
    /// Free text, if the engine answered in prose.
    pub text: Option<String>,
}

/// External language model. Only reached through the generation and
/// synthesis crates.
pub trait IReasoningEngine: Send + Sync {
    /// Ask for a tool call conforming to `tool`.
    fn generate(&self, prompt: &Prompt, tool: &ToolSchema)
        -> Result<StructuredResult, EngineError>;

    /// Plain text completion.
    fn complete(&self, prompt: &Prompt) -> Result<String, EngineError>;

    fn name(&self) -> &str;
}
