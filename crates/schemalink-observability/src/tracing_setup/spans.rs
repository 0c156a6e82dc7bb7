//! Span names and the per-request span.

/// Span and stage names shared by the loop and its logs.
pub mod names {
    pub const REQUEST: &str = "schemalink.request";
    pub const ATTEMPT: &str = "schemalink.attempt";

    pub const STAGE_RETRIEVING: &str = "retrieving";
    pub const STAGE_GENERATING: &str = "generating";
    pub const STAGE_VALIDATING: &str = "validating";
    pub const STAGE_EXECUTING: &str = "executing";
    pub const STAGE_SYNTHESIZING: &str = "synthesizing";
}

/// One span per request. Every event of the correction loop is emitted
/// inside it.
#[macro_export]
macro_rules! request_span {
    ($request_id:expr, $max_attempts:expr) => {
        tracing::info_span!(
            "schemalink.request",
            request_id = %$request_id,
            max_attempts = $max_attempts,
        )
    };
}

/// One span per generation attempt, nested in the request span.
#[macro_export]
macro_rules! attempt_span {
    ($attempt_index:expr) => {
        tracing::debug_span!("schemalink.attempt", attempt = $attempt_index)
    };
}
