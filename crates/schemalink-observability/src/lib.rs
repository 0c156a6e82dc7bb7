//! # schemalink-observability
//!
//! Subscriber initialisation, one structured event per key loop step, the
//! request span, and counters fed by the attempt observer hook.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::{LoopMetrics, MetricsObserver};
pub use tracing_setup::{init_tracing, init_tracing_from_config, init_tracing_with_filter};
