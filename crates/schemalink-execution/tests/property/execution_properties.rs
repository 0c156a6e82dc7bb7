//! Property: delivered rows never exceed the ceiling.

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;

use schemalink_core::config::ExecutionConfig;
use schemalink_core::{ExecutionOutcome, SqlCandidate, SqlDialect};
use schemalink_execution::{GuardedExecutor, SqliteDatabase};
use test_fixtures::SqliteFixture;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn rows_never_exceed_max_rows(table_rows in 0usize..300, max_rows in 1usize..120) {
        let fixture = SqliteFixture::with_events(table_rows);
        let config = ExecutionConfig { max_rows, ..Default::default() };
        let db = SqliteDatabase::open(fixture.path(), &config).unwrap();
        let ex = GuardedExecutor::new(Arc::new(db), config);

        let outcome = ex.execute(
            &SqlCandidate::new("SELECT * FROM Events", SqlDialect::Sqlite),
            Duration::from_secs(5),
        );
        match outcome {
            ExecutionOutcome::Success(s) => {
                prop_assert!(s.row_count <= max_rows);
                prop_assert_eq!(s.row_count, table_rows.min(max_rows));
                prop_assert_eq!(s.truncated, table_rows > max_rows);
            }
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }
}
