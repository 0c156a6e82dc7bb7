use std::sync::Arc;

use proptest::prelude::*;
use schemalink_core::config::{ExecutionConfig, GuardConfig};
use schemalink_core::models::{SqlCandidate, SqlDialect};
use schemalink_guard::{SchemaCatalog, SqlGuard};

fn guard() -> SqlGuard {
    SqlGuard::new(
        Arc::new(SchemaCatalog::from_tables(&test_fixtures::retail_tables())),
        &GuardConfig::default(),
        &ExecutionConfig::default(),
    )
}

fn forbidden_statement() -> impl Strategy<Value = String> {
    let ident = "[a-z]{1,6}_t";
    (0usize..7, ident, ident).prop_map(|(kind, t, c)| match kind {
        0 => format!("INSERT INTO {t} VALUES (1)"),
        1 => format!("UPDATE {t} SET {c} = 1"),
        2 => format!("DELETE FROM {t}"),
        3 => format!("DROP TABLE {t}"),
        4 => format!("ALTER TABLE {t} ADD COLUMN {c} INT"),
        5 => format!("TRUNCATE TABLE {t}"),
        _ => format!("GRANT SELECT ON {t} TO {c}"),
    })
}

proptest! {
    #[test]
    fn forbidden_statements_are_never_safe(
        stmt in forbidden_statement(),
        position in 0usize..3,
    ) {
        let sql = match position {
            0 => stmt,
            1 => format!("SELECT name FROM Customers; {stmt}"),
            _ => format!("{stmt}; SELECT name FROM Customers"),
        };
        let verdict = guard().validate(&SqlCandidate::new(sql, SqlDialect::Postgres));
        prop_assert!(!verdict.is_safe);
    }

    #[test]
    fn unlimited_selects_always_get_the_cap(
        column in prop::sample::select(vec!["order_id", "amount", "status", "order_date"]),
        filter in 0u32..1000,
    ) {
        let sql = format!("SELECT {column} FROM Orders WHERE amount > {filter}");
        let verdict = guard().validate(&SqlCandidate::new(sql, SqlDialect::Postgres));
        prop_assert!(verdict.is_safe);
        prop_assert!(verdict.limit_injected);
        prop_assert!(verdict.candidate.raw_statement.ends_with("LIMIT 501"));
    }
}
