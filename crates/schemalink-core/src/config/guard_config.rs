use serde::{Deserialize, Serialize};

use super::defaults;

/// SQL guard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Reject statements that reference tables or columns missing from the
    /// schema snapshot.
    pub check_identifiers: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            check_identifiers: defaults::DEFAULT_CHECK_IDENTIFIERS,
        }
    }
}
