//! Per-attempt outcome counts and latency totals.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use schemalink_core::models::{AttemptRecord, ExecutionOutcome, FailureKind};
use schemalink_core::traits::IAttemptObserver;

/// Counts of attempt outcomes across requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoopMetrics {
    pub attempts: u64,
    pub generation_failures: u64,
    pub validation_rejections: u64,
    pub execution_errors: u64,
    pub timeouts: u64,
    pub cancellations: u64,
    pub successes: u64,
    pub truncated_results: u64,
    pub total_generation_ms: u64,
    pub total_execution_ms: u64,
}

impl LoopMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one finished attempt into the counters.
    pub fn record(&mut self, attempt: &AttemptRecord) {
        self.attempts += 1;
        self.total_generation_ms += attempt.generation_latency_ms;
        self.total_execution_ms += attempt.execution_latency_ms.unwrap_or(0);

        if attempt.generation_error.is_some() {
            self.generation_failures += 1;
            return;
        }
        if attempt.verdict.as_ref().is_some_and(|v| !v.is_safe) {
            self.validation_rejections += 1;
            return;
        }
        match &attempt.outcome {
            Some(ExecutionOutcome::Success(s)) => {
                self.successes += 1;
                if s.truncated {
                    self.truncated_results += 1;
                }
            }
            Some(ExecutionOutcome::Failure(f)) => match f.error_kind {
                FailureKind::ExecutionError => self.execution_errors += 1,
                FailureKind::Timeout => self.timeouts += 1,
                FailureKind::Cancelled => self.cancellations += 1,
            },
            None => {}
        }
    }

    /// Share of attempts that returned rows.
    pub fn success_rate(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        self.successes as f64 / self.attempts as f64
    }

    pub fn mean_generation_ms(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        self.total_generation_ms as f64 / self.attempts as f64
    }
}

/// Thread-safe [`LoopMetrics`] usable as the loop's attempt observer.
#[derive(Debug, Default)]
pub struct MetricsObserver {
    metrics: Mutex<LoopMetrics>,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current counters.
    pub fn snapshot(&self) -> LoopMetrics {
        match self.metrics.lock() {
            Ok(m) => m.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl IAttemptObserver for MetricsObserver {
    fn on_attempt(&self, record: &AttemptRecord) {
        let mut metrics = match self.metrics.lock() {
            Ok(m) => m,
            Err(poisoned) => poisoned.into_inner(),
        };
        metrics.record(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemalink_core::models::{ExecutionSuccess, SqlCandidate, SqlDialect};

    fn success(truncated: bool) -> AttemptRecord {
        let mut a = AttemptRecord::new(0);
        a.candidate = Some(SqlCandidate::new("SELECT 1", SqlDialect::Sqlite));
        a.generation_latency_ms = 10;
        a.execution_latency_ms = Some(4);
        a.outcome = Some(ExecutionOutcome::Success(ExecutionSuccess {
            columns: vec!["x".into()],
            rows: vec![],
            row_count: 0,
            truncated,
        }));
        a
    }

    #[test]
    fn outcomes_are_counted_by_kind() {
        let mut m = LoopMetrics::new();
        m.record(&success(true));

        let mut gen_failed = AttemptRecord::new(1);
        gen_failed.generation_error = Some("no candidate".into());
        gen_failed.generation_latency_ms = 30;
        m.record(&gen_failed);

        let mut timed_out = AttemptRecord::new(2);
        timed_out.outcome = Some(ExecutionOutcome::failure(FailureKind::Timeout, "slow"));
        m.record(&timed_out);

        assert_eq!(m.attempts, 3);
        assert_eq!(m.successes, 1);
        assert_eq!(m.truncated_results, 1);
        assert_eq!(m.generation_failures, 1);
        assert_eq!(m.timeouts, 1);
        assert_eq!(m.total_execution_ms, 4);
        assert!((m.mean_generation_ms() - 40.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_metrics_have_zero_rates() {
        let m = LoopMetrics::new();
        assert_eq!(m.success_rate(), 0.0);
        assert_eq!(m.mean_generation_ms(), 0.0);
    }

    #[test]
    fn observer_accumulates() {
        let observer = MetricsObserver::new();
        observer.on_attempt(&success(false));
        observer.on_attempt(&success(false));
        let snap = observer.snapshot();
        assert_eq!(snap.successes, 2);
        assert_eq!(snap.success_rate(), 1.0);
    }
}
