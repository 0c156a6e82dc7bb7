//! Structured log events for the correction loop.
//!
//! Each function emits one `tracing` event with an `event` field naming it.
//! Row values and prompts never appear here; statements only at `debug`.

/// Retrieval produced a bundle.
pub fn retrieval_completed(chunks: usize, tokens: usize, budget: usize, truncated: bool, latency_ms: u64) {
    tracing::info!(
        event = "retrieval_completed",
        chunks = chunks,
        tokens = tokens,
        budget = budget,
        truncated = truncated,
        latency_ms = latency_ms,
        "retrieval completed"
    );
}

/// The engine proposed a candidate statement.
pub fn candidate_generated(attempt: usize, statement: &str, latency_ms: u64) {
    tracing::info!(
        event = "candidate_generated",
        attempt = attempt,
        latency_ms = latency_ms,
        "candidate generated"
    );
    tracing::debug!(event = "candidate_statement", attempt = attempt, sql = %statement);
}

/// The engine output did not yield a candidate.
pub fn generation_failed(attempt: usize, reason: &str) {
    tracing::warn!(
        event = "generation_failed",
        attempt = attempt,
        reason = %reason,
        "generation failed"
    );
}

/// The guard refused a candidate.
pub fn validation_rejected(attempt: usize, violations: usize, summary: &str) {
    tracing::warn!(
        event = "validation_rejected",
        attempt = attempt,
        violations = violations,
        summary = %summary,
        "validation rejected"
    );
}

/// The database (or its watchdog) failed the statement.
pub fn execution_failed(attempt: usize, kind: &str, message: &str, latency_ms: u64) {
    tracing::warn!(
        event = "execution_failed",
        attempt = attempt,
        kind = %kind,
        message = %message,
        latency_ms = latency_ms,
        "execution failed"
    );
}

/// The row ceiling cut a result set.
pub fn execution_truncated(attempt: usize, rows: usize) {
    tracing::info!(
        event = "execution_truncated",
        attempt = attempt,
        rows = rows,
        "result truncated at row ceiling"
    );
}

/// A failed attempt will be followed by another.
pub fn retry_scheduled(attempt: usize, max_attempts: usize, reason: &str) {
    tracing::info!(
        event = "retry_scheduled",
        attempt = attempt,
        next_attempt = attempt + 1,
        max_attempts = max_attempts,
        reason = %reason,
        "retry scheduled"
    );
}

/// The loop reached `Done` or `Failed`.
pub fn loop_terminated(state: &str, attempts: usize, error_code: Option<&str>) {
    match error_code {
        None => tracing::info!(
            event = "loop_terminated",
            state = %state,
            attempts = attempts,
            "request finished"
        ),
        Some(code) => tracing::warn!(
            event = "loop_terminated",
            state = %state,
            attempts = attempts,
            error_code = %code,
            "request failed"
        ),
    }
}

/// Sensitive values were replaced before leaving the system.
pub fn sensitive_value_scrubbed(location: &str, redactions: usize) {
    tracing::info!(
        event = "sensitive_value_scrubbed",
        location = %location,
        redactions = redactions,
        "sensitive values scrubbed"
    );
}
