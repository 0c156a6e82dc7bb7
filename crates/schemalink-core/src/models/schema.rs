//! Schema descriptions and the chunks the index serves.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// One indexed unit of schema context. Immutable once indexed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaChunk {
    pub id: String,
    pub text: String,
    pub source_table: String,
    pub source_columns: Vec<String>,
    /// Empty when the chunk was indexed without an embedding.
    pub embedding_vector: Vec<f32>,
    pub keyword_terms: Vec<String>,
}

impl SchemaChunk {
    /// Render a table description into a chunk (no embedding yet).
    pub fn from_table(table: &TableSchema) -> Self {
        Self {
            id: table.table_name.clone(),
            text: table.descriptive_text(),
            source_table: table.table_name.clone(),
            source_columns: table.columns.iter().map(|c| c.name.clone()).collect(),
            embedding_vector: Vec::new(),
            keyword_terms: table.keyword_terms(),
        }
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding_vector = embedding;
        self
    }
}

/// Metadata for a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: String,
    /// Human-readable meaning of the column.
    #[serde(default)]
    pub business_context: String,
}

/// A relationship used to build JOINs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub source_table: String,
    pub source_column: String,
    pub target_table: String,
    pub target_column: String,
    #[serde(default)]
    pub description: String,
}

impl ForeignKey {
    /// The stored description, or a generated sentence when none was given.
    pub fn describe(&self) -> String {
        if !self.description.trim().is_empty() {
            return self.description.clone();
        }
        format!(
            "The '{}' table is linked to the '{}' table via its column '{}' and the target column '{}'.",
            self.source_table, self.target_table, self.source_column, self.target_column
        )
    }
}

/// The complete description of one table, source of one chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub table_name: String,
    pub columns: Vec<ColumnSchema>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
}

impl TableSchema {
    /// Deterministic descriptive text used for retrieval and prompting.
    pub fn descriptive_text(&self) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "# Table: {}", self.table_name);
        let _ = writeln!(text, "## Columns and Types:");
        for column in &self.columns {
            if column.business_context.trim().is_empty() {
                let _ = writeln!(text, "- {} ({})", column.name, column.data_type);
            } else {
                let _ = writeln!(
                    text,
                    "- {} ({}): {}",
                    column.name, column.data_type, column.business_context
                );
            }
        }
        let _ = writeln!(text, "## Foreign Key Relationships (JOINs):");
        if self.foreign_keys.is_empty() {
            let _ = writeln!(text, "No explicit foreign key links defined.");
        }
        for fk in &self.foreign_keys {
            let _ = writeln!(
                text,
                "- {}.{} -> {}.{}: {}",
                fk.source_table,
                fk.source_column,
                fk.target_table,
                fk.target_column,
                fk.describe()
            );
        }
        text
    }

    /// Lowercased table and column names plus their `_`-separated parts.
    pub fn keyword_terms(&self) -> Vec<String> {
        let mut terms = BTreeSet::new();
        let names = std::iter::once(self.table_name.as_str())
            .chain(self.columns.iter().map(|c| c.name.as_str()));
        for name in names {
            let lower = name.to_lowercase();
            for part in lower.split('_').filter(|p| !p.is_empty()) {
                terms.insert(part.to_string());
            }
            terms.insert(lower);
        }
        terms.into_iter().collect()
    }
}
