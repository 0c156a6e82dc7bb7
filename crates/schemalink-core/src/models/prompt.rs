use serde::{Deserialize, Serialize};

/// A fully assembled prompt. Pure function of its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub system: String,
    pub user: String,
    /// Size of `system + user` under the configured tokenizer.
    pub token_count: usize,
}
