//! Property: the loop always terminates within `max_retries + 1` attempts.

use std::sync::Arc;

use proptest::prelude::*;
use serde_json::json;

use schemalink_agent::{SchemaLink, SchemaLinkOptions, Stage};
use schemalink_core::config::{SchemaLinkConfig, TokenizerKind};
use schemalink_core::errors::{ExecutionError, LoopError};
use schemalink_core::models::SqlDialect;
use schemalink_core::traits::{
    IReadOnlyDatabase, IReasoningEngine, RawRows, StatementRequest, StructuredResult,
};
use test_fixtures::{retail_tables, sql_tool_call, ScriptedEngine};

/// Rows for anything naming `city`, an error otherwise.
struct ScriptedDatabase;

impl IReadOnlyDatabase for ScriptedDatabase {
    fn execute(&self, statement: &str, _request: &StatementRequest) -> Result<RawRows, ExecutionError> {
        if statement.contains("city") {
            Ok(RawRows {
                columns: vec!["city".into()],
                rows: vec![vec![json!("London")]],
            })
        } else {
            Err(ExecutionError::Statement {
                message: "division by zero".into(),
            })
        }
    }

    fn dialect(&self) -> SqlDialect {
        SqlDialect::Postgres
    }
}

#[derive(Debug, Clone, Copy)]
enum Reply {
    Good,
    UnknownTable,
    ExecutionError,
    Prose,
}

fn reply() -> impl Strategy<Value = Reply> {
    prop_oneof![
        Just(Reply::Good),
        Just(Reply::UnknownTable),
        Just(Reply::ExecutionError),
        Just(Reply::Prose),
    ]
}

fn structured(reply: Reply) -> StructuredResult {
    match reply {
        Reply::Good => sql_tool_call("SELECT city FROM Customers", "postgres"),
        Reply::UnknownTable => sql_tool_call("SELECT * FROM Ghosts", "postgres"),
        Reply::ExecutionError => sql_tool_call("SELECT name FROM Customers", "postgres"),
        Reply::Prose => StructuredResult {
            tool_calls: vec![],
            text: Some("try the customers table".into()),
        },
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn attempts_never_exceed_retry_cap(
        max_retries in 0u32..4,
        replies in prop::collection::vec(reply(), 1..8),
    ) {
        let engine = Arc::new(ScriptedEngine::new());
        for r in &replies {
            engine.push_structured(Ok(structured(*r)));
        }
        engine.push_completion(Ok("London.".into()));

        let mut config = SchemaLinkConfig::default();
        config.generation.max_retries = max_retries;
        config.retrieval.tokenizer = TokenizerKind::CharsPerToken;
        let dyn_engine: Arc<dyn IReasoningEngine> = engine.clone();
        let link = SchemaLink::new(SchemaLinkOptions {
            config,
            tables: retail_tables(),
            database: Some(Arc::new(ScriptedDatabase)),
            engine: Some(dyn_engine),
            ..Default::default()
        })
        .unwrap();

        let report = link.ask("which city?");
        let cap = max_retries as usize + 1;

        prop_assert!(report.attempt_count() <= cap);
        prop_assert_eq!(engine.generate_calls(), report.attempt_count());
        prop_assert!(report.final_stage().is_terminal());
        prop_assert_eq!(report.stages.last().copied(), Some(report.final_stage()));

        // The first good reply inside the cap decides the outcome.
        match replies.iter().take(cap).position(|r| matches!(r, Reply::Good)) {
            Some(i) => {
                prop_assert!(report.is_done());
                prop_assert_eq!(report.attempt_count(), i + 1);
            }
            // A drained script fails generation, so the cap is always reached.
            None => {
                prop_assert!(
                    matches!(report.error(), Some(LoopError::RetryBudgetExhausted { .. })),
                    "{:?}",
                    report.error()
                );
                prop_assert_eq!(report.attempt_count(), cap);
            }
        }
        prop_assert!(report.stages.iter().filter(|s| **s == Stage::Retrieving).count() == 1);
    }
}
