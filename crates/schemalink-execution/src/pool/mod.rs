//! Bounded pool of read-only connections.

pub mod pragmas;
pub mod read_pool;

pub use read_pool::{PooledConnection, ReadPool};
