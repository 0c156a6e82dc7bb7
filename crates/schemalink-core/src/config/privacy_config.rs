use serde::{Deserialize, Serialize};

use super::defaults;

/// A deployment-specific sensitive pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPatternConfig {
    pub name: String,
    pub regex: String,
    pub placeholder: String,
}

/// Privacy subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacyConfig {
    /// Scrub string cells of the result set before synthesis.
    pub scrub_results: bool,
    /// Built-in pattern names to switch off (e.g. `"ipv4"`).
    pub disabled_patterns: Vec<String>,
    /// Extra matchers appended after the built-ins.
    pub custom_patterns: Vec<CustomPatternConfig>,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            scrub_results: defaults::DEFAULT_SCRUB_RESULTS,
            disabled_patterns: Vec::new(),
            custom_patterns: Vec::new(),
        }
    }
}
