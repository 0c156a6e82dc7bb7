//! # schemalink-tokens
//!
//! The tokenizer contract shared by retrieval budgeting and prompt sizing.
//! `cl100k_base` via `tiktoken-rs`, cached per content hash, or a
//! chars-per-token approximation.

pub mod budget;
pub mod chars;
pub mod counter;

use std::sync::Arc;

use schemalink_core::config::{RetrievalConfig, TokenizerKind};
use schemalink_core::traits::ITokenizer;

pub use budget::{Allocation, TokenBudget};
pub use chars::CharsPerTokenTokenizer;
pub use counter::{TokenCounter, TokenizerError};

/// Build the tokenizer selected by configuration.
pub fn tokenizer_from_config(
    config: &RetrievalConfig,
) -> Result<Arc<dyn ITokenizer>, TokenizerError> {
    match config.tokenizer {
        TokenizerKind::Cl100k => Ok(Arc::new(TokenCounter::new(config.token_cache_capacity)?)),
        TokenizerKind::CharsPerToken => {
            Ok(Arc::new(CharsPerTokenTokenizer::new(config.chars_per_token)))
        }
    }
}
