use regex::Regex;
use serde_json::Value;
use tracing::debug;

use schemalink_core::config::PrivacyConfig;
use schemalink_core::errors::ConfigError;
use schemalink_core::traits::{ISanitizer, Redaction, SanitizedText};

use crate::patterns::{self, Category, RawMatch};

struct Matcher {
    name: String,
    category: Category,
    regex: Regex,
    placeholder: String,
}

/// Replaces sensitive values with placeholders.
///
/// Scrubbing is idempotent: placeholders never match any built-in pattern.
pub struct ScrubEngine {
    matchers: Vec<Matcher>,
}

impl ScrubEngine {
    /// All built-in matchers.
    pub fn new() -> Self {
        Self {
            matchers: builtin_matchers(&[]),
        }
    }

    /// Built-ins minus `disabled_patterns`, plus compiled custom patterns.
    pub fn from_config(config: &PrivacyConfig) -> Result<Self, ConfigError> {
        let mut matchers = builtin_matchers(&config.disabled_patterns);
        for custom in &config.custom_patterns {
            let regex = Regex::new(&custom.regex).map_err(|e| ConfigError::InvalidValue {
                field: format!("privacy.custom_patterns.{}", custom.name),
                message: e.to_string(),
            })?;
            matchers.push(Matcher {
                name: custom.name.clone(),
                category: Category::Custom,
                regex,
                placeholder: custom.placeholder.clone(),
            });
        }
        Ok(Self { matchers })
    }

    pub fn matcher_names(&self) -> Vec<&str> {
        self.matchers.iter().map(|m| m.name.as_str()).collect()
    }

    /// Non-overlapping matches, sorted descending by start.
    pub fn scan(&self, text: &str) -> Vec<RawMatch> {
        let mut raw = Vec::new();
        for matcher in &self.matchers {
            for m in matcher.regex.find_iter(text) {
                if m.start() == m.end() {
                    continue;
                }
                raw.push(RawMatch {
                    category: matcher.category,
                    pattern_name: matcher.name.clone(),
                    placeholder: matcher.placeholder.clone(),
                    start: m.start(),
                    end: m.end(),
                });
            }
        }
        patterns::resolve_overlaps(raw)
    }

    pub fn contains_sensitive(&self, text: &str) -> bool {
        self.matchers.iter().any(|m| m.regex.is_match(text))
    }

    pub fn scrub(&self, text: &str) -> SanitizedText {
        let matches = self.scan(text);
        let mut result = text.to_string();
        // Descending start order keeps earlier offsets valid.
        for m in &matches {
            result.replace_range(m.start..m.end, &m.placeholder);
        }
        if !matches.is_empty() {
            debug!(redactions = matches.len(), "scrubbed sensitive values");
        }
        let redactions = matches
            .into_iter()
            .rev()
            .map(|m| Redaction {
                category: format!("{}:{}", m.category, m.pattern_name),
                placeholder: m.placeholder,
                start: m.start,
                end: m.end,
            })
            .collect();
        SanitizedText {
            text: result,
            redactions,
        }
    }

    /// Scrub every string inside a JSON value. Returns the number of
    /// redactions applied.
    pub fn scrub_value(&self, value: &Value) -> (Value, usize) {
        match value {
            Value::String(s) => {
                let sanitized = self.scrub(s);
                let count = sanitized.redactions.len();
                (Value::String(sanitized.text), count)
            }
            Value::Array(items) => {
                let mut total = 0;
                let scrubbed = items
                    .iter()
                    .map(|item| {
                        let (v, n) = self.scrub_value(item);
                        total += n;
                        v
                    })
                    .collect();
                (Value::Array(scrubbed), total)
            }
            Value::Object(map) => {
                let mut total = 0;
                let scrubbed = map
                    .iter()
                    .map(|(k, item)| {
                        let (v, n) = self.scrub_value(item);
                        total += n;
                        (k.clone(), v)
                    })
                    .collect();
                (Value::Object(scrubbed), total)
            }
            other => (other.clone(), 0),
        }
    }

    /// Scrub every cell of a row set.
    pub fn scrub_rows(&self, rows: &[Vec<Value>]) -> (Vec<Vec<Value>>, usize) {
        let mut total = 0;
        let scrubbed = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        let (v, n) = self.scrub_value(cell);
                        total += n;
                        v
                    })
                    .collect()
            })
            .collect();
        (scrubbed, total)
    }
}

impl Default for ScrubEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ISanitizer for ScrubEngine {
    fn sanitize(&self, text: &str) -> SanitizedText {
        self.scrub(text)
    }
}

fn builtin_matchers(disabled: &[String]) -> Vec<Matcher> {
    patterns::builtin_patterns()
        .into_iter()
        .filter(|p| !disabled.iter().any(|d| d == p.name))
        .filter_map(|p| {
            let regex = p.regex.as_ref()?.clone();
            Some(Matcher {
                name: p.name.to_string(),
                category: p.category,
                regex,
                placeholder: p.placeholder.to_string(),
            })
        })
        .collect()
}
