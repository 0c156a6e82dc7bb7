//! Properties: answers cite only row values and never leak sensitive values.

use std::sync::Arc;

use proptest::prelude::*;
use serde_json::json;

use schemalink_core::config::SynthesisConfig;
use schemalink_core::models::ExecutionSuccess;
use schemalink_privacy::ScrubEngine;
use schemalink_synthesis::SynthesisGuard;
use schemalink_tokens::CharsPerTokenTokenizer;
use test_fixtures::ScriptedEngine;

const NAMES: [&str; 3] = ["Ada Lovelace", "Grace Hopper", "Linus Torvalds"];

fn guard(engine: Arc<ScriptedEngine>) -> SynthesisGuard {
    SynthesisGuard::new(
        engine,
        Arc::new(ScrubEngine::new()),
        Arc::new(CharsPerTokenTokenizer::new(4)),
        SynthesisConfig::default(),
    )
}

/// Every run of digits in `text`.
fn digit_runs(text: &str) -> Vec<u64> {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn final_answer_cites_only_row_values_and_is_scrubbed(
        values in prop::collection::vec(1u32..100_000, 1..6),
        cited in 1u32..100_000,
        user in "[a-z]{3,8}",
    ) {
        let email = format!("{user}@example.com");
        let rows: Vec<_> = values.iter().map(|v| vec![json!(email), json!(v)]).collect();
        let success = ExecutionSuccess {
            columns: vec!["contact".into(), "amount".into()],
            row_count: rows.len(),
            rows,
            truncated: false,
        };

        let engine = Arc::new(ScriptedEngine::new());
        engine.push_completion(Ok(format!("Contact {email} spent {cited}.")));
        let answer = guard(engine).synthesize("how much?", &success, None, 1).unwrap();

        prop_assert!(!answer.text.contains(&email));
        for n in digit_runs(&answer.text) {
            prop_assert!(
                values.iter().any(|&v| u64::from(v) == n) || n == success.row_count as u64,
                "{} not in rows: {}", n, answer.text
            );
        }
    }

    #[test]
    fn invented_names_never_reach_the_answer(
        first in "[A-Z][a-z]{4,8}",
        last in "[A-Z][a-z]{4,8}",
        picked in 0usize..NAMES.len(),
    ) {
        let invented = format!("{first} {last}");
        prop_assume!(!NAMES.iter().any(|n| n.contains(&first) || n.contains(&last)));
        let rows: Vec<_> = NAMES.iter().map(|n| vec![json!(n)]).collect();
        let success = ExecutionSuccess {
            columns: vec!["name".into()],
            row_count: rows.len(),
            rows,
            truncated: false,
        };

        let engine = Arc::new(ScriptedEngine::new());
        engine.push_completion(Ok(format!(
            "The first customer is {} and the second is {invented}.",
            NAMES[picked]
        )));
        let answer = guard(engine).synthesize("who are the customers?", &success, None, 1).unwrap();

        prop_assert!(!answer.text.contains(&invented));
        prop_assert!(answer.text.starts_with("The query returned 3 row(s):"));
    }
}
