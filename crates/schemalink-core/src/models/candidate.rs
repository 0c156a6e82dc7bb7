use serde::{Deserialize, Serialize};

use super::SqlDialect;

/// A single proposed statement. Never a chain of statements once it has
/// passed the guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlCandidate {
    pub raw_statement: String,
    /// Always the configured dialect.
    pub dialect: SqlDialect,
    /// The tool arguments exactly as the engine sent them.
    pub declared_tool_args: serde_json::Value,
}

impl SqlCandidate {
    pub fn new(raw_statement: impl Into<String>, dialect: SqlDialect) -> Self {
        Self {
            raw_statement: raw_statement.into(),
            dialect,
            declared_tool_args: serde_json::Value::Null,
        }
    }
}
