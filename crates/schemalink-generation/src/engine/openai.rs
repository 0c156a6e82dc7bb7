//! OpenAI-compatible chat-completions adapter over blocking reqwest.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use schemalink_core::config::GenerationConfig;
use schemalink_core::errors::EngineError;
use schemalink_core::models::Prompt;
use schemalink_core::traits::{IReasoningEngine, StructuredResult, ToolSchema};

use super::wire;

/// Default chat-completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Longest response body kept in an `Http` error.
const MAX_ERROR_BODY: usize = 512;

/// Connection settings for an OpenAI-compatible provider.
#[derive(Debug, Clone)]
pub struct OpenAiEngineConfig {
    /// Full chat-completions URL.
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl OpenAiEngineConfig {
    /// Settings from configuration; the API key is read from the variable
    /// named by `api_key_env`.
    pub fn from_generation_config(config: &GenerationConfig) -> Self {
        Self::from_generation_config_with(config, |key| std::env::var(key).ok())
    }

    pub fn from_generation_config_with<F>(config: &GenerationConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            endpoint: config
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            model: config.model.clone(),
            api_key: lookup(&config.api_key_env).filter(|k| !k.trim().is_empty()),
            timeout: Duration::from_millis(config.engine_timeout_ms),
        }
    }
}

/// Talks to any provider exposing the chat-completions API with function
/// calling.
#[derive(Debug)]
pub struct OpenAiCompatibleEngine {
    config: OpenAiEngineConfig,
    client: reqwest::blocking::Client,
}

impl OpenAiCompatibleEngine {
    pub fn new(config: OpenAiEngineConfig) -> Result<Self, EngineError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .build()
            .map_err(|e| EngineError::Transport {
                reason: e.to_string(),
            })?;
        Ok(Self { config, client })
    }

    pub fn from_config(config: &GenerationConfig) -> Result<Self, EngineError> {
        Self::new(OpenAiEngineConfig::from_generation_config(config))
    }

    fn post(&self, body: &Value) -> Result<Value, EngineError> {
        let mut req = self.client.post(&self.config.endpoint).json(body);
        if let Some(ref key) = self.config.api_key {
            req = req.bearer_auth(key);
        }
        debug!(endpoint = %self.config.endpoint, model = %self.config.model, "engine request");

        let resp = req.send().map_err(|e| EngineError::Transport {
            reason: e.to_string(),
        })?;
        let status = resp.status();
        if !status.is_success() {
            let mut body = resp.text().unwrap_or_default();
            if let Some((idx, _)) = body.char_indices().nth(MAX_ERROR_BODY) {
                body.truncate(idx);
            }
            return Err(EngineError::Http {
                status: status.as_u16(),
                body,
            });
        }
        resp.json::<Value>()
            .map_err(|e| EngineError::MalformedResponse {
                reason: format!("response is not JSON: {e}"),
            })
    }
}

impl IReasoningEngine for OpenAiCompatibleEngine {
    fn generate(
        &self,
        prompt: &Prompt,
        tool: &ToolSchema,
    ) -> Result<StructuredResult, EngineError> {
        let body = wire::build_request_body(&self.config.model, prompt, Some(tool));
        wire::parse_structured_response(&self.post(&body)?)
    }

    fn complete(&self, prompt: &Prompt) -> Result<String, EngineError> {
        let body = wire::build_request_body(&self.config.model, prompt, None);
        wire::parse_completion(&self.post(&body)?)
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_reads_key_from_named_variable() {
        let gen = GenerationConfig {
            api_key_env: "MY_KEY".into(),
            ..Default::default()
        };
        let cfg = OpenAiEngineConfig::from_generation_config_with(&gen, |k| {
            (k == "MY_KEY").then(|| "sk-test".to_string())
        });
        assert_eq!(cfg.api_key.as_deref(), Some("sk-test"));
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.model, "gpt-4o");
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let gen = GenerationConfig {
            endpoint: Some("http://localhost:9/v1/chat/completions".into()),
            ..Default::default()
        };
        let cfg = OpenAiEngineConfig::from_generation_config_with(&gen, |_| Some("  ".into()));
        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.endpoint, "http://localhost:9/v1/chat/completions");
    }
}
