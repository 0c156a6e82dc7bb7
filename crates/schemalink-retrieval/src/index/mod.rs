//! In-memory schema index: cosine vector search plus BM25 keyword search.
//!
//! Built once by ingestion, then shared read-only (`Arc`) across requests.

mod bm25;

use std::collections::HashMap;

use schemalink_core::errors::RetrievalError;
use schemalink_core::models::{SchemaChunk, TableSchema};
use schemalink_core::traits::{IEmbeddingProvider, ISchemaIndex};

pub use bm25::Bm25Index;

#[derive(Debug, Default)]
pub struct InMemorySchemaIndex {
    chunks: Vec<SchemaChunk>,
    by_id: HashMap<String, usize>,
    bm25: Bm25Index,
    dimensions: Option<usize>,
}

impl InMemorySchemaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render each table into a chunk, embed it and index it.
    pub fn from_tables(
        tables: &[TableSchema],
        embedder: &dyn IEmbeddingProvider,
    ) -> Result<Self, RetrievalError> {
        let mut index = Self::new();
        for table in tables {
            let chunk = SchemaChunk::from_table(table);
            let embedding = embedder.embed(&chunk.text)?;
            index.insert(chunk.with_embedding(embedding))?;
        }
        Ok(index)
    }

    /// Add one chunk. All embedded chunks must share one dimensionality.
    pub fn insert(&mut self, chunk: SchemaChunk) -> Result<(), RetrievalError> {
        if self.by_id.contains_key(&chunk.id) {
            return Err(RetrievalError::DuplicateChunk { chunk_id: chunk.id });
        }
        if !chunk.embedding_vector.is_empty() {
            let actual = chunk.embedding_vector.len();
            match self.dimensions {
                Some(expected) if expected != actual => {
                    return Err(RetrievalError::DimensionMismatch { expected, actual });
                }
                Some(_) => {}
                None => self.dimensions = Some(actual),
            }
        }
        self.bm25.add(&chunk);
        self.by_id.insert(chunk.id.clone(), self.chunks.len());
        self.chunks.push(chunk);
        Ok(())
    }

    pub fn chunks(&self) -> &[SchemaChunk] {
        &self.chunks
    }
}

impl ISchemaIndex for InMemorySchemaIndex {
    fn search_vector(&self, embedding: &[f32], limit: usize) -> Result<Vec<String>, RetrievalError> {
        if embedding.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        if let Some(expected) = self.dimensions {
            if expected != embedding.len() {
                return Err(RetrievalError::DimensionMismatch {
                    expected,
                    actual: embedding.len(),
                });
            }
        }

        let mut scored: Vec<(&str, f32)> = self
            .chunks
            .iter()
            .filter(|c| !c.embedding_vector.is_empty())
            .map(|c| (c.id.as_str(), cosine_similarity(embedding, &c.embedding_vector)))
            // Zero similarity shares nothing with the question.
            .filter(|(_, sim)| *sim > 0.0)
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        scored.truncate(limit);
        Ok(scored.into_iter().map(|(id, _)| id.to_string()).collect())
    }

    fn search_keyword(&self, terms: &[String], limit: usize) -> Result<Vec<String>, RetrievalError> {
        Ok(self.bm25.search(terms, limit))
    }

    fn fetch(&self, chunk_id: &str) -> Result<Option<SchemaChunk>, RetrievalError> {
        Ok(self.by_id.get(chunk_id).map(|&i| self.chunks[i].clone()))
    }

    fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}

/// Cosine similarity; 0.0 when either vector has no magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a <= f32::EPSILON || norm_b <= f32::EPSILON {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
