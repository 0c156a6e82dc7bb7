//! SQLite adapter for [`IReadOnlyDatabase`].

use std::path::Path;
use std::time::Duration;

use rusqlite::types::ValueRef;
use rusqlite::Connection;
use serde_json::Value;
use tracing::debug;

use schemalink_core::config::ExecutionConfig;
use schemalink_core::errors::ExecutionError;
use schemalink_core::models::SqlDialect;
use schemalink_core::traits::{IReadOnlyDatabase, RawRows, StatementRequest};

use crate::pool::ReadPool;
use crate::watchdog;

/// A SQLite file reached only through read-only pooled connections.
///
/// Writes are refused three times over: the open flags, `query_only`, and a
/// check that SQLite itself classifies the prepared statement as read-only.
pub struct SqliteDatabase {
    pool: ReadPool,
    acquire_timeout: Duration,
}

impl SqliteDatabase {
    pub fn open(path: &Path, config: &ExecutionConfig) -> Result<Self, ExecutionError> {
        Ok(Self {
            pool: ReadPool::open(path, config.read_pool_size)?,
            acquire_timeout: config.acquire_timeout(),
        })
    }

    pub fn pool(&self) -> &ReadPool {
        &self.pool
    }
}

impl IReadOnlyDatabase for SqliteDatabase {
    fn execute(
        &self,
        statement: &str,
        request: &StatementRequest,
    ) -> Result<RawRows, ExecutionError> {
        let conn = self
            .pool
            .acquire(request.bounded(self.acquire_timeout), &request.cancel)?;
        let timeout = request.bounded(request.timeout);
        if timeout.is_zero() {
            return Err(ExecutionError::Timeout {
                timeout_ms: request.timeout.as_millis() as u64,
            });
        }
        watchdog::run_guarded(&conn, timeout, &request.cancel, |conn| {
            read_rows(conn, statement, request.fetch_limit)
        })
    }

    fn dialect(&self) -> SqlDialect {
        SqlDialect::Sqlite
    }
}

fn read_rows(conn: &Connection, sql: &str, fetch_limit: usize) -> Result<RawRows, ExecutionError> {
    let mut stmt = conn.prepare(sql).map_err(statement_error)?;
    if !stmt.readonly() {
        return Err(ExecutionError::NotReadOnly);
    }
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let width = columns.len();

    let mut rows = stmt.query([]).map_err(statement_error)?;
    let mut out = Vec::new();
    while out.len() < fetch_limit {
        let Some(row) = rows.next().map_err(statement_error)? else {
            break;
        };
        let mut values = Vec::with_capacity(width);
        for idx in 0..width {
            values.push(to_json(row.get_ref(idx).map_err(statement_error)?));
        }
        out.push(values);
    }
    debug!(rows = out.len(), fetch_limit, "rows read");
    Ok(RawRows { columns, rows: out })
}

/// SQLite's own message, unchanged.
fn statement_error(e: rusqlite::Error) -> ExecutionError {
    let message = match &e {
        rusqlite::Error::SqliteFailure(_, Some(msg)) => msg.clone(),
        other => other.to_string(),
    };
    ExecutionError::Statement { message }
}

fn to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::String(format!("<blob {} bytes>", bytes.len())),
    }
}
