//! PRAGMA configuration applied to every pooled read connection.
//!
//! query_only ON on top of the read-only open flag, in-memory temp store,
//! no busy wait beyond the statement watchdog.

use rusqlite::Connection;

use schemalink_core::errors::ExecutionError;

/// Apply read-only pragmas to a read connection.
pub fn apply_read_pragmas(conn: &Connection) -> Result<(), ExecutionError> {
    conn.execute_batch(
        "
        PRAGMA query_only = ON;
        PRAGMA cache_size = -16000;
        PRAGMA busy_timeout = 1000;
        PRAGMA temp_store = MEMORY;
        ",
    )
    .map_err(|e| ExecutionError::Connection {
        reason: e.to_string(),
    })?;
    Ok(())
}

/// Whether `query_only` is active on a connection.
pub fn verify_query_only(conn: &Connection) -> Result<bool, ExecutionError> {
    let enabled: i64 = conn
        .pragma_query_value(None, "query_only", |row| row.get(0))
        .map_err(|e| ExecutionError::Connection {
            reason: e.to_string(),
        })?;
    Ok(enabled == 1)
}
