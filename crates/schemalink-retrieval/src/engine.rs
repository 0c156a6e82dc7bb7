//! RankFusionRetriever: vector + keyword rankings fused by RRF, trimmed to a
//! token budget.

use std::sync::Arc;

use schemalink_core::config::RetrievalConfig;
use schemalink_core::errors::RetrievalError;
use schemalink_core::models::{RankedHit, RetrievalBundle, SchemaChunk};
use schemalink_core::traits::{IEmbeddingProvider, ISchemaIndex, ITokenizer};
use tracing::{debug, info, warn};

use crate::budget;
use crate::search::{extract_query_terms, rrf_fusion};

pub struct RankFusionRetriever {
    index: Arc<dyn ISchemaIndex>,
    embedder: Arc<dyn IEmbeddingProvider>,
    tokenizer: Arc<dyn ITokenizer>,
    config: RetrievalConfig,
}

impl RankFusionRetriever {
    pub fn new(
        index: Arc<dyn ISchemaIndex>,
        embedder: Arc<dyn IEmbeddingProvider>,
        tokenizer: Arc<dyn ITokenizer>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            index,
            embedder,
            tokenizer,
            config,
        }
    }

    /// Retrieve with the configured `top_k` and token budget.
    pub fn retrieve_configured(&self, question: &str) -> Result<RetrievalBundle, RetrievalError> {
        self.retrieve(question, self.config.top_k, self.config.token_budget)
    }

    /// Fused schema context for `question`.
    ///
    /// Empty (not an error) when `top_k` is 0 or the index holds nothing.
    /// Errors only when the index itself cannot be read.
    pub fn retrieve(
        &self,
        question: &str,
        top_k: usize,
        token_budget: usize,
    ) -> Result<RetrievalBundle, RetrievalError> {
        if top_k == 0 || self.index.chunk_count() == 0 {
            debug!(top_k, "retrieval skipped: nothing to rank");
            return Ok(RetrievalBundle::empty(token_budget));
        }

        let pool = self.config.candidate_pool(top_k);
        let vector_ranked = self.vector_ranking(question, pool)?;
        let terms = extract_query_terms(question);
        let keyword_ranked = if terms.is_empty() {
            Vec::new()
        } else {
            self.index.search_keyword(&terms, pool)?
        };

        let mut fused = rrf_fusion::fuse(&vector_ranked, &keyword_ranked, self.config.rrf_k);
        fused.truncate(top_k);

        let candidates = self.fetch_all(fused)?;
        let packed = budget::pack(candidates, token_budget, self.tokenizer.as_ref());

        info!(
            vector_hits = vector_ranked.len(),
            keyword_hits = keyword_ranked.len(),
            chunks = packed.chunks.len(),
            tokens = packed.total_tokens,
            budget = token_budget,
            truncated = packed.truncated,
            "retrieval complete"
        );

        Ok(RetrievalBundle {
            chunks: packed.chunks,
            hits: packed.hits,
            total_token_count: packed.total_tokens,
            token_budget,
            truncated: packed.truncated,
        })
    }

    /// Vector ranking, or an empty list when the question cannot be
    /// embedded (keyword-only degradation).
    fn vector_ranking(&self, question: &str, pool: usize) -> Result<Vec<String>, RetrievalError> {
        match self.embedder.embed(question) {
            Ok(embedding) => self.index.search_vector(&embedding, pool),
            Err(e) => {
                warn!(
                    embedder = self.embedder.name(),
                    error = %e,
                    "embedding failed, degrading to keyword-only retrieval"
                );
                Ok(Vec::new())
            }
        }
    }

    fn fetch_all(
        &self,
        hits: Vec<RankedHit>,
    ) -> Result<Vec<(RankedHit, SchemaChunk)>, RetrievalError> {
        let mut out = Vec::with_capacity(hits.len());
        for hit in hits {
            match self.index.fetch(&hit.chunk_id)? {
                Some(chunk) => out.push((hit, chunk)),
                None => warn!(chunk_id = %hit.chunk_id, "ranked chunk missing from index"),
            }
        }
        Ok(out)
    }
}
