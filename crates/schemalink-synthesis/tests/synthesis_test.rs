//! SynthesisGuard with a scripted engine.

use std::sync::Arc;

use serde_json::{json, Value};

use schemalink_core::config::SynthesisConfig;
use schemalink_core::errors::{EngineError, SynthesisError};
use schemalink_core::models::ExecutionSuccess;
use schemalink_privacy::ScrubEngine;
use schemalink_synthesis::SynthesisGuard;
use schemalink_tokens::CharsPerTokenTokenizer;
use test_fixtures::{ScriptedEngine, CUSTOMER_EMAILS};

fn guard(engine: &Arc<ScriptedEngine>, config: SynthesisConfig) -> SynthesisGuard {
    SynthesisGuard::new(
        engine.clone(),
        Arc::new(ScrubEngine::new()),
        Arc::new(CharsPerTokenTokenizer::new(4)),
        config,
    )
}

fn success(columns: &[&str], rows: Vec<Vec<Value>>, truncated: bool) -> ExecutionSuccess {
    ExecutionSuccess {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        row_count: rows.len(),
        rows,
        truncated,
    }
}

fn customers() -> ExecutionSuccess {
    success(
        &["name", "email", "total"],
        vec![
            vec![json!("Ada Lovelace"), json!(CUSTOMER_EMAILS[0]), json!(84.75)],
            vec![json!("Grace Hopper"), json!(CUSTOMER_EMAILS[1]), json!(224.25)],
        ],
        false,
    )
}

#[test]
fn grounded_answer_is_returned() {
    let engine = Arc::new(ScriptedEngine::new());
    engine.push_completion(Ok("Grace Hopper spent 224.25 and Ada Lovelace spent 84.75.".into()));
    let answer = guard(&engine, SynthesisConfig::default())
        .synthesize("Who spent the most?", &customers(), Some("SELECT ..."), 1)
        .unwrap();
    assert_eq!(answer.text, "Grace Hopper spent 224.25 and Ada Lovelace spent 84.75.");
    assert_eq!(answer.executed_sql.as_deref(), Some("SELECT ..."));
    assert_eq!(answer.attempt_count, 1);
    assert!(!answer.truncated);
}

#[test]
fn engine_never_sees_raw_emails() {
    let engine = Arc::new(ScriptedEngine::new());
    engine.push_completion(Ok("Two customers.".into()));
    guard(&engine, SynthesisConfig::default())
        .synthesize("List customers", &customers(), None, 1)
        .unwrap();
    let prompt = &engine.complete_prompts()[0];
    for email in &CUSTOMER_EMAILS[..2] {
        assert!(!prompt.user.contains(email));
    }
    assert!(prompt.user.contains("[EMAIL]"));
    assert!(prompt.system.contains("GROUNDING CONSTRAINT"));
    assert!(prompt.user.contains("List customers"));
}

#[test]
fn answer_is_scrubbed_even_when_rows_are_not() {
    let engine = Arc::new(ScriptedEngine::new());
    engine.push_completion(Ok(format!("Ada can be reached at \"{}\".", CUSTOMER_EMAILS[0])));
    let answer = guard(&engine, SynthesisConfig::default())
        .with_result_scrubbing(false)
        .synthesize("How do I reach Ada?", &customers(), None, 1)
        .unwrap();
    assert!(!answer.text.contains(CUSTOMER_EMAILS[0]));
    assert!(answer.text.contains("[EMAIL]"));
}

#[test]
fn ungrounded_answer_falls_back_to_table() {
    let engine = Arc::new(ScriptedEngine::new());
    engine.push_completion(Ok("Sales will reach 10000 next quarter.".into()));
    let answer = guard(&engine, SynthesisConfig::default())
        .synthesize("Who spent the most?", &customers(), None, 1)
        .unwrap();
    assert!(!answer.text.contains("10000"));
    assert!(answer.text.starts_with("The query returned 2 row(s):"));
    assert!(answer.text.contains("| Grace Hopper | [EMAIL] | 224.25 |"));
}

#[test]
fn invented_name_falls_back_to_table() {
    let engine = Arc::new(ScriptedEngine::new());
    engine.push_completion(Ok("The top customer is Alan Turing, based in Berlin.".into()));
    let answer = guard(&engine, SynthesisConfig::default())
        .synthesize("Who spent the most?", &customers(), None, 1)
        .unwrap();
    assert!(!answer.text.contains("Alan Turing"));
    assert!(!answer.text.contains("Berlin"));
    assert!(answer.text.starts_with("The query returned 2 row(s):"));
}

#[test]
fn flipped_sign_falls_back_to_table() {
    let engine = Arc::new(ScriptedEngine::new());
    engine.push_completion(Ok("Net income in Q1 was a gain of 120.".into()));
    let ledger = success(&["quarter", "net_income"], vec![vec![json!("Q1"), json!(-120)]], false);
    let answer = guard(&engine, SynthesisConfig::default())
        .synthesize("What was net income in Q1?", &ledger, None, 1)
        .unwrap();
    assert!(answer.text.starts_with("The query returned 1 row(s):"));
    assert!(answer.text.contains("-120"));

    engine.push_completion(Ok("Net income in Q1 was -120.".into()));
    let answer = guard(&engine, SynthesisConfig::default())
        .synthesize("What was net income in Q1?", &ledger, None, 1)
        .unwrap();
    assert_eq!(answer.text, "Net income in Q1 was -120.");
}

#[test]
fn grounding_enforcement_can_be_disabled() {
    let engine = Arc::new(ScriptedEngine::new());
    engine.push_completion(Ok("Sales will reach 10000.".into()));
    let config = SynthesisConfig {
        enforce_grounding: false,
        ..Default::default()
    };
    let answer = guard(&engine, config)
        .synthesize("q", &customers(), None, 1)
        .unwrap();
    assert_eq!(answer.text, "Sales will reach 10000.");
}

#[test]
fn empty_result_uses_template_without_engine() {
    let engine = Arc::new(ScriptedEngine::new());
    let answer = guard(&engine, SynthesisConfig::default())
        .synthesize("Orders from Mars?", &success(&["id"], vec![], false), Some("SELECT id"), 2)
        .unwrap();
    assert_eq!(engine.complete_calls(), 0);
    assert!(answer.text.starts_with("No matching data"));
    assert!(answer.text.contains("Orders from Mars?"));
    assert_eq!(answer.attempt_count, 2);
}

#[test]
fn sql_is_withheld_when_disabled() {
    let engine = Arc::new(ScriptedEngine::new());
    engine.push_completion(Ok("Two customers.".into()));
    let config = SynthesisConfig {
        include_sql: false,
        ..Default::default()
    };
    let answer = guard(&engine, config)
        .synthesize("q", &customers(), Some("SELECT 1"), 1)
        .unwrap();
    assert!(answer.executed_sql.is_none());
}

#[test]
fn truncation_is_passed_through() {
    let engine = Arc::new(ScriptedEngine::new());
    engine.push_completion(Ok("Two customers shown.".into()));
    let mut rows = customers();
    rows.truncated = true;
    let answer = guard(&engine, SynthesisConfig::default())
        .synthesize("q", &rows, None, 1)
        .unwrap();
    assert!(answer.truncated);
    assert!(engine.complete_prompts()[0].user.contains("truncated"));
}

#[test]
fn engine_failure_is_terminal_error() {
    let engine = Arc::new(ScriptedEngine::new());
    engine.push_completion(Err(EngineError::Transport {
        reason: "connection reset".into(),
    }));
    let err = guard(&engine, SynthesisConfig::default())
        .synthesize("q", &customers(), None, 1)
        .unwrap_err();
    assert!(matches!(err, SynthesisError::Engine(_)));
}

#[test]
fn blank_answer_is_an_error() {
    let engine = Arc::new(ScriptedEngine::new());
    engine.push_completion(Ok("   ".into()));
    let err = guard(&engine, SynthesisConfig::default())
        .synthesize("q", &customers(), None, 1)
        .unwrap_err();
    assert!(matches!(err, SynthesisError::EmptyAnswer));
}
