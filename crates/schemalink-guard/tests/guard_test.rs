use std::sync::Arc;

use schemalink_core::config::{ExecutionConfig, GuardConfig};
use schemalink_core::models::{SqlCandidate, SqlDialect, ValidationVerdict, ViolationKind};
use schemalink_guard::{SchemaCatalog, SqlGuard};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn retail_guard() -> SqlGuard {
    let catalog = SchemaCatalog::from_tables(&test_fixtures::retail_tables());
    SqlGuard::new(
        Arc::new(catalog),
        &GuardConfig::default(),
        &ExecutionConfig::default(),
    )
}

fn validate(sql: &str) -> ValidationVerdict {
    retail_guard().validate(&SqlCandidate::new(sql, SqlDialect::Postgres))
}

fn kinds(verdict: &ValidationVerdict) -> Vec<ViolationKind> {
    verdict.violations.iter().map(|v| v.kind).collect()
}

// ---------------------------------------------------------------------------
// Statement shape
// ---------------------------------------------------------------------------

#[test]
fn chained_drop_is_rejected_citing_second_statement() {
    let verdict = validate("SELECT * FROM users; DROP TABLE users;");
    assert!(!verdict.is_safe);
    let multi = verdict
        .violations
        .iter()
        .find(|v| v.kind == ViolationKind::MultipleStatements)
        .expect("multiple statement violation");
    assert!(multi.detail.contains("statement 2"), "{}", multi.detail);
    assert!(multi.detail.contains("DROP TABLE users"), "{}", multi.detail);
}

#[test]
fn violations_are_collected_not_short_circuited() {
    let verdict = validate("SELECT * FROM users; DROP TABLE users;");
    let kinds = kinds(&verdict);
    assert!(kinds.contains(&ViolationKind::MultipleStatements));
    assert!(kinds.contains(&ViolationKind::ForbiddenStatement));
    assert!(kinds.contains(&ViolationKind::UnknownTable));
}

#[test]
fn every_write_statement_kind_is_forbidden() {
    let cases = [
        ("INSERT INTO Orders (order_id) VALUES (9)", "INSERT"),
        ("UPDATE Orders SET amount = 0", "UPDATE"),
        ("DELETE FROM Orders", "DELETE"),
        ("DROP TABLE Orders", "DROP"),
        ("ALTER TABLE Orders ADD COLUMN note TEXT", "ALTER"),
        ("TRUNCATE TABLE Orders", "TRUNCATE"),
        ("GRANT SELECT ON Orders TO analyst", "GRANT"),
    ];
    for (sql, keyword) in cases {
        let verdict = validate(sql);
        assert!(!verdict.is_safe, "{sql} should be unsafe");
        let forbidden = verdict
            .violations
            .iter()
            .find(|v| v.kind == ViolationKind::ForbiddenStatement)
            .unwrap_or_else(|| panic!("{sql}: no forbidden-statement violation"));
        assert!(forbidden.detail.starts_with(keyword), "{}", forbidden.detail);
    }
}

#[test]
fn select_into_and_row_locks_are_write_clauses() {
    assert!(kinds(&validate("SELECT * INTO backup FROM Orders")).contains(&ViolationKind::WriteClause));
    assert!(kinds(&validate("SELECT * FROM Orders FOR UPDATE")).contains(&ViolationKind::WriteClause));
}

#[test]
fn empty_and_unparseable_statements_are_unsafe() {
    assert_eq!(kinds(&validate("   ;  ")), vec![ViolationKind::EmptyStatement]);
    assert_eq!(kinds(&validate("SELEC name FRM Customers")), vec![ViolationKind::ParseFailure]);
}

#[test]
fn trailing_semicolon_is_a_single_statement() {
    let verdict = validate("SELECT name FROM Customers;");
    assert!(verdict.is_safe, "{:?}", verdict.violations);
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

#[test]
fn unknown_table_is_flagged_on_empty_catalog() {
    let guard = SqlGuard::new(
        Arc::new(SchemaCatalog::new()),
        &GuardConfig::default(),
        &ExecutionConfig::default(),
    );
    let verdict = guard.validate(&SqlCandidate::new("SELECT name FROM users", SqlDialect::Postgres));
    assert!(!verdict.is_safe);
    assert_eq!(kinds(&verdict), vec![ViolationKind::UnknownTable]);
    assert!(verdict.violations[0].detail.contains("users"));
}

#[test]
fn unknown_column_is_flagged() {
    let verdict = validate("SELECT emial FROM Customers");
    assert_eq!(kinds(&verdict), vec![ViolationKind::UnknownColumn]);

    let verdict = validate("SELECT c.price FROM Customers c");
    assert_eq!(kinds(&verdict), vec![ViolationKind::UnknownColumn]);
    assert!(verdict.violations[0].detail.contains("customers"));
}

#[test]
fn unknown_qualifier_is_flagged() {
    let verdict = validate("SELECT x.name FROM Customers c");
    assert_eq!(kinds(&verdict), vec![ViolationKind::UnknownTable]);
}

#[test]
fn joins_aliases_and_projection_aliases_are_accepted() {
    let verdict = validate(
        "SELECT c.name, COUNT(o.order_id) AS order_count \
         FROM Customers c JOIN Orders o ON o.customer_id = c.customer_id \
         WHERE o.status = 'shipped' \
         GROUP BY c.name ORDER BY order_count DESC",
    );
    assert!(verdict.is_safe, "{:?}", verdict.violations);
}

#[test]
fn ctes_and_subqueries_are_accepted() {
    let verdict = validate(
        "WITH totals AS (SELECT customer_id, SUM(amount) AS total FROM Orders GROUP BY customer_id) \
         SELECT c.name, t.total FROM totals t JOIN Customers c ON c.customer_id = t.customer_id",
    );
    assert!(verdict.is_safe, "{:?}", verdict.violations);

    let verdict = validate(
        "SELECT name FROM Products WHERE product_id IN (SELECT product_id FROM Orders WHERE amount > 40)",
    );
    assert!(verdict.is_safe, "{:?}", verdict.violations);
}

#[test]
fn identifier_checks_can_be_disabled() {
    let guard = SqlGuard::new(
        Arc::new(SchemaCatalog::new()),
        &GuardConfig {
            check_identifiers: false,
        },
        &ExecutionConfig::default(),
    );
    let verdict = guard.validate(&SqlCandidate::new("SELECT * FROM anything", SqlDialect::Postgres));
    assert!(verdict.is_safe);
}

// ---------------------------------------------------------------------------
// Row cap
// ---------------------------------------------------------------------------

#[test]
fn missing_limit_is_injected_not_rejected() {
    let verdict = validate("SELECT name FROM Customers");
    assert!(verdict.is_safe);
    assert!(verdict.limit_injected);
    assert!(verdict.candidate.raw_statement.ends_with("LIMIT 501"), "{}", verdict.candidate.raw_statement);
}

#[test]
fn small_limit_is_kept_verbatim() {
    let sql = "SELECT name FROM Customers LIMIT 5";
    let verdict = validate(sql);
    assert!(!verdict.limit_injected);
    assert_eq!(verdict.candidate.raw_statement, sql);
}

#[test]
fn oversized_limit_is_clamped() {
    let verdict = validate("SELECT name FROM Customers LIMIT 100000");
    assert!(verdict.is_safe);
    assert!(verdict.limit_injected);
    assert!(verdict.candidate.raw_statement.ends_with("LIMIT 501"));
    assert!(!verdict.candidate.raw_statement.contains("100000"));
}

#[test]
fn union_gets_one_outer_limit() {
    let verdict = validate("SELECT name FROM Customers UNION SELECT name FROM Products");
    assert!(verdict.is_safe, "{:?}", verdict.violations);
    assert_eq!(verdict.candidate.raw_statement.matches("LIMIT").count(), 1);
}

#[test]
fn cap_follows_max_rows() {
    let execution = ExecutionConfig {
        max_rows: 10,
        ..ExecutionConfig::default()
    };
    let guard = SqlGuard::new(
        Arc::new(SchemaCatalog::from_tables(&test_fixtures::retail_tables())),
        &GuardConfig::default(),
        &execution,
    );
    assert_eq!(guard.row_cap(), 11);
    let verdict = guard.validate(&SqlCandidate::new("SELECT name FROM Products", SqlDialect::Sqlite));
    assert!(verdict.candidate.raw_statement.ends_with("LIMIT 11"));
}
