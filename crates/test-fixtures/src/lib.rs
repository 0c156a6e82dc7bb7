//! Shared fixtures for SchemaLink integration tests: the sample retail
//! schema, a scripted reasoning engine, and on-disk SQLite databases.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use schemalink_core::models::TableSchema;

mod database;
mod engine;

pub use database::{SqliteFixture, CUSTOMER_EMAILS};
pub use engine::{sql_tool_call, ScriptedEngine};

/// Root of the fixture data shipped with this crate.
pub fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Customers, Orders and Products.
pub fn retail_tables() -> Vec<TableSchema> {
    load_fixture("schema/retail.json")
}
