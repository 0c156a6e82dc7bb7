/// SchemaLink version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the single tool the reasoning engine must call to propose SQL.
pub const SQL_TOOL_NAME: &str = "generate_sql";

/// Maximum number of pooled read connections.
pub const MAX_READ_POOL_SIZE: usize = 8;

/// Environment variable consulted for the tracing filter.
pub const LOG_ENV_VAR: &str = "SCHEMALINK_LOG";

/// Placeholder written over literal values in redacted database messages.
pub const REDACTED_LITERAL: &str = "'?'";
