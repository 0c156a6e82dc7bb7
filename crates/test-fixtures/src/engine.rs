use std::collections::VecDeque;
use std::sync::Mutex;

use schemalink_core::errors::EngineError;
use schemalink_core::models::Prompt;
use schemalink_core::traits::{IReasoningEngine, StructuredResult, ToolCall, ToolSchema};

/// Reasoning engine that replays canned responses in order and records
/// every prompt it was given.
#[derive(Default)]
pub struct ScriptedEngine {
    structured: Mutex<VecDeque<Result<StructuredResult, EngineError>>>,
    completions: Mutex<VecDeque<Result<String, EngineError>>>,
    generate_prompts: Mutex<Vec<Prompt>>,
    complete_prompts: Mutex<Vec<Prompt>>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one `generate` response per statement, each a well-formed
    /// SQL tool call.
    pub fn with_statements(statements: &[&str]) -> Self {
        let engine = Self::new();
        for s in statements {
            engine.push_structured(Ok(sql_tool_call(s, "postgres")));
        }
        engine
    }

    pub fn push_structured(&self, response: Result<StructuredResult, EngineError>) {
        self.structured.lock().unwrap().push_back(response);
    }

    pub fn push_completion(&self, response: Result<String, EngineError>) {
        self.completions.lock().unwrap().push_back(response);
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_prompts.lock().unwrap().len()
    }

    pub fn complete_calls(&self) -> usize {
        self.complete_prompts.lock().unwrap().len()
    }

    pub fn generate_prompts(&self) -> Vec<Prompt> {
        self.generate_prompts.lock().unwrap().clone()
    }

    pub fn complete_prompts(&self) -> Vec<Prompt> {
        self.complete_prompts.lock().unwrap().clone()
    }
}

impl IReasoningEngine for ScriptedEngine {
    fn generate(&self, prompt: &Prompt, _tool: &ToolSchema) -> Result<StructuredResult, EngineError> {
        self.generate_prompts.lock().unwrap().push(prompt.clone());
        self.structured
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(EngineError::Unavailable { provider: "scripted (exhausted)".into() }))
    }

    fn complete(&self, prompt: &Prompt) -> Result<String, EngineError> {
        self.complete_prompts.lock().unwrap().push(prompt.clone());
        self.completions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(EngineError::Unavailable { provider: "scripted (exhausted)".into() }))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// A structured result holding one `generate_sql` call.
pub fn sql_tool_call(statement: &str, dialect: &str) -> StructuredResult {
    StructuredResult {
        tool_calls: vec![ToolCall {
            name: schemalink_core::constants::SQL_TOOL_NAME.to_string(),
            arguments: serde_json::json!({ "statement": statement, "dialect": dialect }),
        }],
        text: None,
    }
}
