//! Attempt counters for a running service.

mod loop_metrics;

pub use loop_metrics::{LoopMetrics, MetricsObserver};
