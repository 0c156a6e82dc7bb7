//! Ranking primitives shared by the index and the retriever.

pub mod rrf_fusion;
pub mod terms;

pub use rrf_fusion::fuse;
pub use terms::{extract_query_terms, tokenize};
