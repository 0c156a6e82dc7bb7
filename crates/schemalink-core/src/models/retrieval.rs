use serde::{Deserialize, Serialize};

use super::SchemaChunk;

/// One fused ranking entry. Transient, produced per query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedHit {
    pub chunk_id: String,
    /// 1-indexed position in the vector list, if present there.
    pub vector_rank: Option<usize>,
    /// 1-indexed position in the keyword list, if present there.
    pub keyword_rank: Option<usize>,
    pub fused_score: f64,
}

/// Retrieved schema context for one request.
///
/// `total_token_count <= token_budget` always holds; chunks are ordered by
/// descending fused score, ties by ascending chunk id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievalBundle {
    pub chunks: Vec<SchemaChunk>,
    /// Fused hits of the chunks above, same order.
    pub hits: Vec<RankedHit>,
    pub total_token_count: usize,
    pub token_budget: usize,
    /// True when the budget dropped at least one fused chunk.
    pub truncated: bool,
}

impl RetrievalBundle {
    pub fn empty(token_budget: usize) -> Self {
        Self {
            token_budget,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }
}
