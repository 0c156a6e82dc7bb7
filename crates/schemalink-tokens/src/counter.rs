use std::sync::Arc;

use moka::sync::Cache;
use schemalink_core::traits::ITokenizer;
use tiktoken_rs::CoreBPE;

#[derive(Debug, thiserror::Error)]
pub enum TokenizerError {
    #[error("failed to load {encoding} tokenizer: {reason}")]
    Load { encoding: String, reason: String },
}

/// Token counter wrapping tiktoken's cl100k_base tokenizer.
/// Caches results per blake3 content hash.
pub struct TokenCounter {
    bpe: Arc<CoreBPE>,
    cache: Cache<String, usize>,
}

impl TokenCounter {
    pub fn new(cache_capacity: u64) -> Result<Self, TokenizerError> {
        let bpe = tiktoken_rs::cl100k_base().map_err(|e| TokenizerError::Load {
            encoding: "cl100k_base".to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            bpe: Arc::new(bpe),
            cache: Cache::new(cache_capacity),
        })
    }

    /// Count tokens in the given text (uncached).
    pub fn count_uncached(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    /// Count tokens with blake3 content-hash caching.
    pub fn count_cached(&self, text: &str) -> usize {
        let hash = blake3::hash(text.as_bytes()).to_hex().to_string();
        self.cache.get_with(hash, || self.count_uncached(text))
    }
}

impl ITokenizer for TokenCounter {
    fn count(&self, text: &str) -> usize {
        self.count_cached(text)
    }

    fn name(&self) -> &str {
        "cl100k_base"
    }
}
