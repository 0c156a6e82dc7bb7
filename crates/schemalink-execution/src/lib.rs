//! # schemalink-execution
//!
//! Runs validated statements on read-only connections. A bounded pool hands
//! out SQLite connections opened read-only, a watchdog interrupts statements
//! that outlive their timeout or get cancelled, and the executor enforces the
//! row ceiling no matter what the statement says.

pub mod executor;
pub mod pool;
pub mod sqlite;
mod watchdog;

pub use executor::GuardedExecutor;
pub use pool::ReadPool;
pub use sqlite::SqliteDatabase;
