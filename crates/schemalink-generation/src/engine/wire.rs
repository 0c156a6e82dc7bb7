//! Chat-completions wire format: request bodies and response parsing.
//! Pure functions so the HTTP layer stays thin.

use serde_json::{json, Value};

use schemalink_core::errors::EngineError;
use schemalink_core::models::Prompt;
use schemalink_core::traits::{StructuredResult, ToolCall, ToolSchema};

/// Request body. With a tool, the engine is forced to call it.
pub fn build_request_body(model: &str, prompt: &Prompt, tool: Option<&ToolSchema>) -> Value {
    let mut body = json!({
        "model": model,
        "temperature": 0,
        "messages": [
            { "role": "system", "content": prompt.system },
            { "role": "user", "content": prompt.user },
        ],
    });
    if let (Some(tool), Some(obj)) = (tool, body.as_object_mut()) {
        obj.insert(
            "tools".into(),
            json!([{
                "type": "function",
                "function": {
                    "name": tool.name,
                    "description": tool.description,
                    "parameters": tool.parameters,
                }
            }]),
        );
        obj.insert(
            "tool_choice".into(),
            json!({ "type": "function", "function": { "name": tool.name } }),
        );
    }
    body
}

fn first_message(response: &Value) -> Result<&Value, EngineError> {
    response
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c0| c0.get("message"))
        .ok_or_else(|| EngineError::MalformedResponse {
            reason: "no choices[0].message".to_string(),
        })
}

/// Tool calls and any prose from the first choice.
///
/// Arguments arrive as a JSON-encoded string; a string that does not parse
/// is kept verbatim so the generator can report it as the wrong type.
pub fn parse_structured_response(response: &Value) -> Result<StructuredResult, EngineError> {
    let message = first_message(response)?;
    let text = message
        .get("content")
        .and_then(Value::as_str)
        .map(str::to_string);

    let mut tool_calls = Vec::new();
    if let Some(calls) = message.get("tool_calls").and_then(Value::as_array) {
        for call in calls {
            let function = call.get("function").ok_or_else(|| EngineError::MalformedResponse {
                reason: "tool call without function".to_string(),
            })?;
            let name = function
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| EngineError::MalformedResponse {
                    reason: "tool call without name".to_string(),
                })?;
            let arguments = match function.get("arguments") {
                Some(Value::String(raw)) => {
                    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.clone()))
                }
                Some(other) => other.clone(),
                None => Value::Null,
            };
            tool_calls.push(ToolCall {
                name: name.to_string(),
                arguments,
            });
        }
    }
    Ok(StructuredResult { tool_calls, text })
}

/// Prose content of the first choice.
pub fn parse_completion(response: &Value) -> Result<String, EngineError> {
    first_message(response)?
        .get("content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| EngineError::MalformedResponse {
            reason: "no message content".to_string(),
        })
}
