//! # schemalink-retrieval
//!
//! Schema context retrieval for one question.
//!
//! ```text
//! RankFusionRetriever
//! ├── embed question (HashedTfEmbedder or any IEmbeddingProvider)
//! ├── ISchemaIndex::search_vector  (cosine)     ─┐
//! ├── ISchemaIndex::search_keyword (BM25)       ─┤ each over-fetched to top_k * 3
//! ├── RRF fusion, ties by chunk id              ◄┘
//! └── budget packer (first overflow stops)
//! ```

pub mod budget;
pub mod embedding;
pub mod engine;
pub mod index;
pub mod search;

pub use embedding::HashedTfEmbedder;
pub use engine::RankFusionRetriever;
pub use index::InMemorySchemaIndex;
