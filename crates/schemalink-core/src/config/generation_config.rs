use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::SqlDialect;

/// SQL generation and correction-loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Target dialect. Fixed per deployment.
    pub dialect: SqlDialect,
    /// Retries after the first attempt. Total attempts = `max_retries + 1`.
    pub max_retries: u32,
    /// Model name passed to the reasoning engine adapter.
    pub model: String,
    /// Optional override of the provider endpoint.
    pub endpoint: Option<String>,
    /// Name of the environment variable holding the provider API key.
    pub api_key_env: String,
    /// HTTP timeout for a single reasoning-engine call.
    pub engine_timeout_ms: u64,
}

impl GenerationConfig {
    /// Total generation attempts allowed per request.
    pub fn max_attempts(&self) -> usize {
        self.max_retries as usize + 1
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            dialect: SqlDialect::Postgres,
            max_retries: defaults::DEFAULT_MAX_RETRIES,
            model: defaults::DEFAULT_MODEL.to_string(),
            endpoint: None,
            api_key_env: defaults::DEFAULT_API_KEY_ENV.to_string(),
            engine_timeout_ms: defaults::DEFAULT_ENGINE_TIMEOUT_MS,
        }
    }
}
