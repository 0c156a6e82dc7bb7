//! Pool of 1–8 read-only connections with blocking, bounded checkout.

use std::ops::Deref;
use std::path::Path;
use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use schemalink_core::constants::MAX_READ_POOL_SIZE;
use schemalink_core::errors::ExecutionError;
use schemalink_core::CancellationToken;

use super::pragmas::apply_read_pragmas;

/// Default number of read connections.
const DEFAULT_POOL_SIZE: usize = 4;

/// How often a blocked checkout re-checks its cancellation token.
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// A pool of read-only SQLite connections.
///
/// A connection is owned by exactly one request while checked out; callers
/// beyond the pool size block until one is returned, their wait expires, or
/// they are cancelled.
pub struct ReadPool {
    idle: Mutex<Vec<Connection>>,
    returned: Condvar,
    size: usize,
}

impl ReadPool {
    /// Open a pool of read connections to the given database path.
    pub fn open(path: &Path, pool_size: usize) -> Result<Self, ExecutionError> {
        let size = pool_size.clamp(1, MAX_READ_POOL_SIZE);
        let mut connections = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(|e| ExecutionError::Connection {
                reason: e.to_string(),
            })?;
            apply_read_pragmas(&conn)?;
            connections.push(conn);
        }
        debug!(size, path = %path.display(), "read pool opened");
        Ok(Self {
            idle: Mutex::new(connections),
            returned: Condvar::new(),
            size,
        })
    }

    /// Check out a connection, waiting at most `wait`.
    ///
    /// Returns `PoolExhausted` when the wait runs out and `Cancelled` as soon
    /// as `cancel` flips.
    pub fn acquire(
        &self,
        wait: Duration,
        cancel: &CancellationToken,
    ) -> Result<PooledConnection<'_>, ExecutionError> {
        let started = Instant::now();
        let deadline = started + wait;
        let mut idle = self.lock_idle()?;
        loop {
            if cancel.is_cancelled() {
                return Err(ExecutionError::Cancelled);
            }
            if let Some(conn) = idle.pop() {
                return Ok(PooledConnection {
                    pool: self,
                    conn: Some(conn),
                });
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(ExecutionError::PoolExhausted {
                    waited_ms: started.elapsed().as_millis() as u64,
                });
            }
            let slice = (deadline - now).min(CANCEL_POLL_INTERVAL);
            let (guard, _) = self
                .returned
                .wait_timeout(idle, slice)
                .map_err(|_| poisoned())?;
            idle = guard;
        }
    }

    /// Execute a closure with a checked-out read connection.
    pub fn with_conn<F, T>(
        &self,
        wait: Duration,
        cancel: &CancellationToken,
        f: F,
    ) -> Result<T, ExecutionError>
    where
        F: FnOnce(&Connection) -> Result<T, ExecutionError>,
    {
        let conn = self.acquire(wait, cancel)?;
        f(&conn)
    }

    /// Number of connections in the pool.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Connections not currently checked out.
    pub fn idle_count(&self) -> usize {
        self.idle.lock().map(|idle| idle.len()).unwrap_or(0)
    }

    /// Default pool size.
    pub fn default_size() -> usize {
        DEFAULT_POOL_SIZE
    }

    fn lock_idle(&self) -> Result<MutexGuard<'_, Vec<Connection>>, ExecutionError> {
        self.idle.lock().map_err(|_| poisoned())
    }

    fn release(&self, conn: Connection) {
        match self.idle.lock() {
            Ok(mut idle) => {
                idle.push(conn);
                self.returned.notify_one();
            }
            // A poisoned pool refuses every checkout; the connection is closed.
            Err(_) => drop(conn),
        }
    }
}

fn poisoned() -> ExecutionError {
    ExecutionError::Connection {
        reason: "read pool lock poisoned".to_string(),
    }
}

/// A connection checked out of a [`ReadPool`]. Returned on drop.
pub struct PooledConnection<'a> {
    pool: &'a ReadPool,
    conn: Option<Connection>,
}

impl Deref for PooledConnection<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        // Only `drop` takes the connection out.
        self.conn.as_ref().unwrap_or_else(|| unreachable!())
    }
}

impl Drop for PooledConnection<'_> {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            self.pool.release(conn);
        }
    }
}
