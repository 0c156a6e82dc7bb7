//! StructuredGenerator: one engine call, one candidate.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use schemalink_core::constants::SQL_TOOL_NAME;
use schemalink_core::errors::GenerationError;
use schemalink_core::models::{Prompt, SqlCandidate, SqlDialect};
use schemalink_core::traits::{IReasoningEngine, ToolSchema};

use crate::tool::sql_tool_schema;

/// Longest free-text excerpt kept in a `FreeTextResponse` error.
const EXCERPT_CHARS: usize = 160;

/// Calls the reasoning engine through the fixed `generate_sql` contract.
///
/// Only the first tool call is used; extra proposals are discarded. The
/// candidate's dialect is always the configured one.
pub struct StructuredGenerator {
    engine: Arc<dyn IReasoningEngine>,
    dialect: SqlDialect,
    tool: ToolSchema,
}

impl StructuredGenerator {
    pub fn new(engine: Arc<dyn IReasoningEngine>, dialect: SqlDialect) -> Self {
        Self {
            engine,
            dialect,
            tool: sql_tool_schema(dialect),
        }
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    pub fn generate(&self, prompt: &Prompt) -> Result<SqlCandidate, GenerationError> {
        let result = self.engine.generate(prompt, &self.tool)?;

        let mut calls = result.tool_calls.into_iter();
        let Some(call) = calls.next() else {
            return Err(match result.text.filter(|t| !t.trim().is_empty()) {
                Some(text) => GenerationError::FreeTextResponse {
                    excerpt: excerpt(&text),
                },
                None => GenerationError::NoCandidates,
            });
        };
        let discarded = calls.count();
        if discarded > 0 {
            debug!(discarded, "engine proposed extra tool calls; keeping the first");
        }

        if call.name != SQL_TOOL_NAME {
            return Err(GenerationError::UnknownTool { name: call.name });
        }
        let args = match &call.arguments {
            Value::Object(map) => map,
            _ => {
                return Err(GenerationError::WrongType {
                    field: "arguments".to_string(),
                    expected: "object".to_string(),
                })
            }
        };

        let statement = required_str(args, "statement")?;
        let statement = normalize_statement(statement);
        if statement.is_empty() {
            return Err(GenerationError::EmptyStatement);
        }

        let declared = required_str(args, "dialect")?;
        match declared.parse::<SqlDialect>() {
            Ok(d) if d == self.dialect => {}
            _ => warn!(
                declared,
                configured = %self.dialect,
                "engine declared a different dialect; using the configured one"
            ),
        }

        Ok(SqlCandidate {
            raw_statement: statement,
            dialect: self.dialect,
            declared_tool_args: call.arguments.clone(),
        })
    }
}

fn required_str<'a>(
    args: &'a serde_json::Map<String, Value>,
    field: &str,
) -> Result<&'a str, GenerationError> {
    match args.get(field) {
        None | Some(Value::Null) => Err(GenerationError::MissingField {
            field: field.to_string(),
        }),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(GenerationError::WrongType {
            field: field.to_string(),
            expected: "string".to_string(),
        }),
    }
}

/// Strip Markdown fences and surrounding whitespace. Inner text is kept as is.
fn normalize_statement(raw: &str) -> String {
    let mut s = raw.trim();
    if let Some(rest) = s.strip_prefix("```") {
        let rest = rest
            .strip_prefix("sql")
            .or_else(|| rest.strip_prefix("SQL"))
            .unwrap_or(rest);
        s = rest.strip_suffix("```").unwrap_or(rest).trim();
    }
    s.to_string()
}

fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(EXCERPT_CHARS) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
