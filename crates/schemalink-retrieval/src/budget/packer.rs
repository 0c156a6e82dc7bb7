//! Greedy prefix packing: chunks are taken in fused order until the next
//! one would overflow. An overflowing chunk is dropped whole, never cut.

use schemalink_core::models::{RankedHit, SchemaChunk};
use schemalink_core::traits::ITokenizer;
use schemalink_tokens::TokenBudget;

#[derive(Debug, Default)]
pub struct PackedContext {
    pub chunks: Vec<SchemaChunk>,
    pub hits: Vec<RankedHit>,
    pub total_tokens: usize,
    /// At least one candidate was left out.
    pub truncated: bool,
}

pub fn pack(
    candidates: Vec<(RankedHit, SchemaChunk)>,
    budget: usize,
    tokenizer: &dyn ITokenizer,
) -> PackedContext {
    let texts: Vec<&str> = candidates.iter().map(|(_, c)| c.text.as_str()).collect();
    let allocations = TokenBudget::new(tokenizer).pack_prefix(&texts, budget);
    let total_tokens = TokenBudget::used(&allocations);
    let truncated = allocations.len() < candidates.len();

    let (hits, chunks): (Vec<RankedHit>, Vec<SchemaChunk>) = candidates.into_iter().take(allocations.len()).unzip();
    PackedContext {
        chunks,
        hits,
        total_tokens,
        truncated,
    }
}
