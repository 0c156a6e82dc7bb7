//! The single tool the engine may call during SQL generation.

use serde_json::json;

use schemalink_core::constants::SQL_TOOL_NAME;
use schemalink_core::models::SqlDialect;
use schemalink_core::traits::ToolSchema;

/// `generate_sql { statement: string, dialect: string }`, both required.
pub fn sql_tool_schema(dialect: SqlDialect) -> ToolSchema {
    ToolSchema {
        name: SQL_TOOL_NAME.to_string(),
        description: format!(
            "Submit exactly one read-only {} statement answering the user's question.",
            dialect.display_name()
        ),
        parameters: json!({
            "type": "object",
            "properties": {
                "statement": {
                    "type": "string",
                    "description": "A single SELECT (or WITH ... SELECT) statement, without a trailing semicolon."
                },
                "dialect": {
                    "type": "string",
                    "description": "SQL dialect of the statement.",
                    "enum": [dialect.as_str()]
                }
            },
            "required": ["statement", "dialect"],
            "additionalProperties": false
        }),
    }
}
