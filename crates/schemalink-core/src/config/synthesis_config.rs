use serde::{Deserialize, Serialize};

use super::defaults;

/// Answer synthesis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Replace answers that cite values absent from the rows.
    pub enforce_grounding: bool,
    /// Rows serialized into the synthesis prompt.
    pub max_rows_in_prompt: usize,
    /// Return the executed SQL alongside the answer.
    pub include_sql: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            enforce_grounding: defaults::DEFAULT_ENFORCE_GROUNDING,
            max_rows_in_prompt: defaults::DEFAULT_MAX_ROWS_IN_PROMPT,
            include_sql: defaults::DEFAULT_INCLUDE_SQL,
        }
    }
}
