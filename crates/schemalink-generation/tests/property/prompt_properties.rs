//! Properties of prompt assembly.

use std::sync::Arc;

use proptest::prelude::*;

use schemalink_core::models::{AttemptRecord, ExecutionOutcome, FailureKind};
use schemalink_core::{RetrievalBundle, SqlCandidate, SqlDialect};
use schemalink_generation::PromptAssembler;
use schemalink_tokens::CharsPerTokenTokenizer;

fn failed_attempt(index: usize) -> AttemptRecord {
    let mut a = AttemptRecord::new(index);
    a.candidate = Some(SqlCandidate::new(format!("SELECT c{index} FROM t"), SqlDialect::Postgres));
    a.outcome = Some(ExecutionOutcome::failure(
        FailureKind::ExecutionError,
        format!("error number {index}"),
    ));
    a
}

proptest! {
    #[test]
    fn only_the_latest_failure_reaches_the_prompt(failures in 1usize..8, question in "[a-z ]{1,40}") {
        let assembler = PromptAssembler::new(
            SqlDialect::Postgres,
            Arc::new(CharsPerTokenTokenizer::new(4)),
        );
        let attempts: Vec<_> = (0..failures).map(failed_attempt).collect();
        let prompt = assembler.build(&question, &RetrievalBundle::default(), &attempts);
        let latest = failures - 1;
        let expected = format!("error number {latest}");
        prop_assert!(prompt.user.contains(&expected));
        for earlier in 0..latest {
            let marker = format!("error number {earlier}");
            prop_assert!(!prompt.user.contains(&marker));
        }
        let again = assembler.build(&question, &RetrievalBundle::default(), &attempts);
        prop_assert_eq!(prompt, again);
    }
}
