use std::collections::HashMap;
use std::io::Write;

use schemalink_core::config::*;
use schemalink_core::errors::ConfigError;
use schemalink_core::SqlDialect;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = SchemaLinkConfig::from_toml("").unwrap();

    assert_eq!(config.retrieval.token_budget, 500);
    assert_eq!(config.retrieval.top_k, 10);
    assert_eq!(config.retrieval.rrf_k, 60);
    assert_eq!(config.retrieval.candidate_multiplier, 3);
    assert_eq!(config.retrieval.tokenizer, TokenizerKind::Cl100k);

    assert_eq!(config.generation.dialect, SqlDialect::Postgres);
    assert_eq!(config.generation.max_retries, 1);
    assert_eq!(config.generation.max_attempts(), 2);

    assert_eq!(config.execution.statement_timeout_ms, 5_000);
    assert_eq!(config.execution.max_rows, 500);
    assert_eq!(config.execution.injected_limit(), 501);
    assert_eq!(config.execution.read_pool_size, 4);

    assert!(config.guard.check_identifiers);
    assert!(config.synthesis.enforce_grounding);
    assert!(config.privacy.scrub_results);
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[retrieval]
token_budget = 1200
tokenizer = "chars_per_token"

[generation]
dialect = "sqlite"
max_retries = 3
"#;
    let config = SchemaLinkConfig::from_toml(toml).unwrap();
    assert_eq!(config.retrieval.token_budget, 1200);
    assert_eq!(config.retrieval.tokenizer, TokenizerKind::CharsPerToken);
    assert_eq!(config.retrieval.rrf_k, 60);
    assert_eq!(config.generation.dialect, SqlDialect::Sqlite);
    assert_eq!(config.generation.max_attempts(), 4);
}

#[test]
fn zero_budget_is_rejected() {
    let err = SchemaLinkConfig::from_toml("[retrieval]\ntoken_budget = 0\n").unwrap_err();
    match err {
        ConfigError::InvalidValue { field, .. } => assert_eq!(field, "retrieval.token_budget"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn zero_max_rows_is_rejected() {
    assert!(SchemaLinkConfig::from_toml("[execution]\nmax_rows = 0\n").is_err());
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = SchemaLinkConfig::from_toml("[retrieval\n").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn overrides_apply_from_lookup() {
    let vars: HashMap<&str, &str> = [
        ("SCHEMALINK_TOKEN_BUDGET", "800"),
        ("SCHEMALINK_MAX_RETRIES", "0"),
        ("SCHEMALINK_SQL_DIALECT", "mysql"),
        ("SCHEMALINK_MAX_ROWS", " 25 "),
    ]
    .into_iter()
    .collect();

    let mut config = SchemaLinkConfig::default();
    config
        .apply_overrides_from(|key| vars.get(key).map(|v| v.to_string()))
        .unwrap();

    assert_eq!(config.retrieval.token_budget, 800);
    assert_eq!(config.generation.max_retries, 0);
    assert_eq!(config.generation.max_attempts(), 1);
    assert_eq!(config.generation.dialect, SqlDialect::Mysql);
    assert_eq!(config.execution.max_rows, 25);
}

#[test]
fn unparseable_override_names_the_variable() {
    let mut config = SchemaLinkConfig::default();
    let err = config
        .apply_overrides_from(|key| (key == "SCHEMALINK_TOP_K").then(|| "many".to_string()))
        .unwrap_err();
    match err {
        ConfigError::InvalidValue { field, .. } => assert_eq!(field, "SCHEMALINK_TOP_K"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn load_reads_file_and_reports_missing() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[execution]\nstatement_timeout_ms = 250").unwrap();
    let config = SchemaLinkConfig::load(file.path()).unwrap();
    assert_eq!(config.execution.statement_timeout_ms, 250);

    let missing = std::path::Path::new("/definitely/not/here/schemalink.toml");
    assert!(matches!(
        SchemaLinkConfig::load(missing),
        Err(ConfigError::FileNotFound { .. })
    ));
}

#[test]
fn config_serde_roundtrip() {
    let config = SchemaLinkConfig::default();
    let toml_str = toml::to_string(&config).unwrap();
    let roundtripped = SchemaLinkConfig::from_toml(&toml_str).unwrap();
    assert_eq!(roundtripped.retrieval.token_budget, config.retrieval.token_budget);
    assert_eq!(roundtripped.generation.dialect, config.generation.dialect);
}
