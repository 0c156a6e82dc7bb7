use serde::{Deserialize, Serialize};

use super::defaults;

/// Which tokenizer sizes retrieved context and prompts.
///
/// The same choice must size both, otherwise the token budget guarantee
/// does not carry over to the assembled prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    /// tiktoken `cl100k_base`.
    Cl100k,
    /// `ceil(chars / chars_per_token)`.
    CharsPerToken,
}

/// Retrieval subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Token ceiling for retrieved schema context per request.
    pub token_budget: usize,
    /// Number of fused results kept before budget packing.
    pub top_k: usize,
    /// RRF rank-damping constant.
    pub rrf_k: u32,
    /// Each ranked list is fetched with `top_k * candidate_multiplier` entries.
    pub candidate_multiplier: usize,
    pub tokenizer: TokenizerKind,
    /// Only used with `TokenizerKind::CharsPerToken`.
    pub chars_per_token: usize,
    /// Capacity of the content-hash token count cache.
    pub token_cache_capacity: u64,
}

impl RetrievalConfig {
    /// Size of each ranked candidate list handed to fusion.
    pub fn candidate_pool(&self, top_k: usize) -> usize {
        top_k.saturating_mul(self.candidate_multiplier.max(1))
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            token_budget: defaults::DEFAULT_TOKEN_BUDGET,
            top_k: defaults::DEFAULT_TOP_K,
            rrf_k: defaults::DEFAULT_RRF_K,
            candidate_multiplier: defaults::DEFAULT_CANDIDATE_MULTIPLIER,
            tokenizer: TokenizerKind::Cl100k,
            chars_per_token: defaults::DEFAULT_CHARS_PER_TOKEN,
            token_cache_capacity: defaults::DEFAULT_TOKEN_CACHE_CAPACITY,
        }
    }
}
