//! Statement watchdog.
//!
//! A scoped thread waits beside the running statement and calls
//! `sqlite3_interrupt` through the connection's interrupt handle when the
//! timeout elapses or the request is cancelled.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use rusqlite::{Connection, InterruptHandle};
use tracing::debug;

use schemalink_core::errors::ExecutionError;
use schemalink_core::CancellationToken;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

const NOT_TRIPPED: u8 = 0;
const TRIPPED_TIMEOUT: u8 = 1;
const TRIPPED_CANCEL: u8 = 2;

/// Run `f` on `conn`, interrupting it after `timeout` or on cancellation.
///
/// When the watchdog fired and `f` failed, the failure is reported as
/// `Timeout` or `Cancelled` rather than the driver's interrupt error. A
/// statement that completed before the interrupt landed keeps its result.
pub(crate) fn run_guarded<T, F>(
    conn: &Connection,
    timeout: Duration,
    cancel: &CancellationToken,
    f: F,
) -> Result<T, ExecutionError>
where
    F: FnOnce(&Connection) -> Result<T, ExecutionError>,
{
    if cancel.is_cancelled() {
        return Err(ExecutionError::Cancelled);
    }
    let handle = conn.get_interrupt_handle();
    let tripped = AtomicU8::new(NOT_TRIPPED);
    let (done_tx, done_rx) = mpsc::channel::<()>();

    let result = std::thread::scope(|scope| {
        let tripped = &tripped;
        scope.spawn(move || watch(handle, done_rx, timeout, cancel, tripped));
        let result = f(conn);
        drop(done_tx);
        result
    });

    match (result, tripped.load(Ordering::Acquire)) {
        (Ok(value), _) => Ok(value),
        (Err(_), TRIPPED_TIMEOUT) => Err(ExecutionError::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        }),
        (Err(_), TRIPPED_CANCEL) => Err(ExecutionError::Cancelled),
        (Err(e), _) => Err(e),
    }
}

fn watch(
    handle: InterruptHandle,
    done: mpsc::Receiver<()>,
    timeout: Duration,
    cancel: &CancellationToken,
    tripped: &AtomicU8,
) {
    let deadline = Instant::now() + timeout;
    loop {
        let now = Instant::now();
        if now >= deadline {
            tripped.store(TRIPPED_TIMEOUT, Ordering::Release);
            debug!(timeout_ms = timeout.as_millis() as u64, "statement timed out, interrupting");
            handle.interrupt();
            return;
        }
        match done.recv_timeout((deadline - now).min(POLL_INTERVAL)) {
            Err(RecvTimeoutError::Timeout) => {}
            // Sender dropped: the statement finished.
            _ => return,
        }
        if cancel.is_cancelled() {
            tripped.store(TRIPPED_CANCEL, Ordering::Release);
            debug!("request cancelled, interrupting statement");
            handle.interrupt();
            return;
        }
    }
}
