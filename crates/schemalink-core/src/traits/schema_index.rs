use crate::errors::RetrievalError;
use crate::models::SchemaChunk;

/// Read side of the schema index. Owned by the ingestion side; retrieval
/// only queries it.
pub trait ISchemaIndex: Send + Sync {
    /// Chunk ids ordered by descending vector similarity, at most `limit`.
    fn search_vector(&self, embedding: &[f32], limit: usize) -> Result<Vec<String>, RetrievalError>;

    /// Chunk ids ordered by descending keyword relevance, at most `limit`.
    fn search_keyword(&self, terms: &[String], limit: usize) -> Result<Vec<String>, RetrievalError>;

    /// Fetch one chunk by id.
    fn fetch(&self, chunk_id: &str) -> Result<Option<SchemaChunk>, RetrievalError>;

    /// Number of indexed chunks.
    fn chunk_count(&self) -> usize;
}
