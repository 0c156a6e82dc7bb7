use std::sync::Arc;

use proptest::prelude::*;
use schemalink_core::config::RetrievalConfig;
use schemalink_core::models::{ColumnSchema, TableSchema};
use schemalink_retrieval::search::fuse;
use schemalink_retrieval::{HashedTfEmbedder, InMemorySchemaIndex, RankFusionRetriever};
use schemalink_tokens::CharsPerTokenTokenizer;

fn table(name: String, columns: Vec<String>) -> TableSchema {
    TableSchema {
        table_name: name,
        columns: columns
            .into_iter()
            .map(|c| ColumnSchema {
                name: c,
                data_type: "TEXT".into(),
                business_context: String::new(),
            })
            .collect(),
        foreign_keys: vec![],
    }
}

proptest! {
    #[test]
    fn bundle_never_exceeds_budget(
        tables in prop::collection::btree_map(
            "[a-z]{3,8}",
            prop::collection::vec("[a-z_]{2,10}", 1..12),
            0..8,
        ),
        question in "[a-z ]{0,40}",
        top_k in 0usize..6,
        budget in 0usize..400,
    ) {
        let tables: Vec<TableSchema> = tables.into_iter().map(|(n, c)| table(n, c)).collect();
        let embedder = HashedTfEmbedder::default();
        let index = InMemorySchemaIndex::from_tables(&tables, &embedder).unwrap();
        let retriever = RankFusionRetriever::new(
            Arc::new(index),
            Arc::new(embedder),
            Arc::new(CharsPerTokenTokenizer::new(4)),
            RetrievalConfig::default(),
        );
        let bundle = retriever.retrieve(&question, top_k, budget).unwrap();
        prop_assert!(bundle.total_token_count <= budget);
        prop_assert!(bundle.chunks.len() <= top_k);
    }

    #[test]
    fn fusion_is_deterministic_and_tie_broken(
        vector in prop::collection::vec("c[0-9]{1,2}", 0..15),
        keyword in prop::collection::vec("c[0-9]{1,2}", 0..15),
        k in 1u32..100,
    ) {
        let first = fuse(&vector, &keyword, k);
        let second = fuse(&vector, &keyword, k);
        prop_assert_eq!(&first, &second);
        for pair in first.windows(2) {
            prop_assert!(
                pair[0].fused_score > pair[1].fused_score
                    || (pair[0].fused_score == pair[1].fused_score
                        && pair[0].chunk_id < pair[1].chunk_id)
            );
        }
    }
}
