//! Configuration surface. The whole tree is an immutable value handed to
//! constructors; nothing reads configuration from global state.

pub mod defaults;
mod execution_config;
mod generation_config;
mod guard_config;
mod observability_config;
mod privacy_config;
mod retrieval_config;
mod synthesis_config;

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use execution_config::ExecutionConfig;
pub use generation_config::GenerationConfig;
pub use guard_config::GuardConfig;
pub use observability_config::ObservabilityConfig;
pub use privacy_config::{CustomPatternConfig, PrivacyConfig};
pub use retrieval_config::{RetrievalConfig, TokenizerKind};
pub use synthesis_config::SynthesisConfig;

use crate::errors::ConfigError;
use crate::models::SqlDialect;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaLinkConfig {
    pub retrieval: RetrievalConfig,
    pub generation: GenerationConfig,
    pub guard: GuardConfig,
    pub execution: ExecutionConfig,
    pub synthesis: SynthesisConfig,
    pub privacy: PrivacyConfig,
    pub observability: ObservabilityConfig,
}

impl SchemaLinkConfig {
    /// Parse and validate a TOML document. Missing sections keep defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(ConfigError::FileNotFound { path: display });
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            path: display.clone(),
            message: e.to_string(),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: display,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `SCHEMALINK_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup, then re-validate.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_override(&lookup, "SCHEMALINK_TOKEN_BUDGET")? {
            self.retrieval.token_budget = v;
        }
        if let Some(v) = parse_override(&lookup, "SCHEMALINK_TOP_K")? {
            self.retrieval.top_k = v;
        }
        if let Some(v) = parse_override(&lookup, "SCHEMALINK_RRF_K")? {
            self.retrieval.rrf_k = v;
        }
        if let Some(v) = parse_override(&lookup, "SCHEMALINK_MAX_RETRIES")? {
            self.generation.max_retries = v;
        }
        if let Some(v) = parse_override(&lookup, "SCHEMALINK_STATEMENT_TIMEOUT_MS")? {
            self.execution.statement_timeout_ms = v;
        }
        if let Some(v) = parse_override(&lookup, "SCHEMALINK_MAX_ROWS")? {
            self.execution.max_rows = v;
        }
        if let Some(v) = parse_override::<SqlDialect, _>(&lookup, "SCHEMALINK_SQL_DIALECT")? {
            self.generation.dialect = v;
        }
        self.validate()
    }

    /// Reject values that would void the hard guarantees.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retrieval.token_budget == 0 {
            return Err(invalid("retrieval.token_budget", "must be greater than 0"));
        }
        if self.retrieval.rrf_k == 0 {
            return Err(invalid("retrieval.rrf_k", "must be greater than 0"));
        }
        if self.retrieval.tokenizer == TokenizerKind::CharsPerToken
            && self.retrieval.chars_per_token == 0
        {
            return Err(invalid("retrieval.chars_per_token", "must be greater than 0"));
        }
        if self.execution.max_rows == 0 {
            return Err(invalid("execution.max_rows", "must be greater than 0"));
        }
        if self.execution.statement_timeout_ms == 0 {
            return Err(invalid(
                "execution.statement_timeout_ms",
                "must be greater than 0",
            ));
        }
        if self.execution.read_pool_size == 0 {
            return Err(invalid("execution.read_pool_size", "must be greater than 0"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn parse_override<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                field: key.to_string(),
                message: e.to_string(),
            }),
    }
}
