// Single source of truth for all default values.

// --- Retrieval ---
pub const DEFAULT_TOKEN_BUDGET: usize = 500;
pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_RRF_K: u32 = 60;
pub const DEFAULT_CANDIDATE_MULTIPLIER: usize = 3;
pub const DEFAULT_CHARS_PER_TOKEN: usize = 4;
pub const DEFAULT_TOKEN_CACHE_CAPACITY: u64 = 10_000;

// --- Generation ---
pub const DEFAULT_MAX_RETRIES: u32 = 1;
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_API_KEY_ENV: &str = "SCHEMALINK_LLM_API_KEY";
pub const DEFAULT_ENGINE_TIMEOUT_MS: u64 = 30_000;

// --- Guard ---
pub const DEFAULT_CHECK_IDENTIFIERS: bool = true;

// --- Execution ---
pub const DEFAULT_STATEMENT_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_MAX_ROWS: usize = 500;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_ACQUIRE_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_REDACT_ERROR_LITERALS: bool = true;

// --- Synthesis ---
pub const DEFAULT_ENFORCE_GROUNDING: bool = true;
pub const DEFAULT_MAX_ROWS_IN_PROMPT: usize = 50;
pub const DEFAULT_INCLUDE_SQL: bool = true;

// --- Privacy ---
pub const DEFAULT_SCRUB_RESULTS: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
