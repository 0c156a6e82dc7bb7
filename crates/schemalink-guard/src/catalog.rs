//! The current schema snapshot: case-insensitive table → column set.

use std::collections::{BTreeMap, BTreeSet};

use schemalink_core::models::{SchemaChunk, TableSchema};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaCatalog {
    tables: BTreeMap<String, BTreeSet<String>>,
}

impl SchemaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_chunks(chunks: &[SchemaChunk]) -> Self {
        let mut catalog = Self::new();
        for chunk in chunks {
            catalog.add_table(&chunk.source_table, chunk.source_columns.iter());
        }
        catalog
    }

    pub fn from_tables(tables: &[TableSchema]) -> Self {
        let mut catalog = Self::new();
        for table in tables {
            catalog.add_table(&table.table_name, table.columns.iter().map(|c| &c.name));
        }
        catalog
    }

    /// Columns merge when the same table is added twice.
    pub fn add_table<I, S>(&mut self, table: &str, columns: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entry = self.tables.entry(table.to_lowercase()).or_default();
        entry.extend(columns.into_iter().map(|c| c.as_ref().to_lowercase()));
    }

    pub fn has_table(&self, table: &str) -> bool {
        self.tables.contains_key(&table.to_lowercase())
    }

    pub fn columns(&self, table: &str) -> Option<&BTreeSet<String>> {
        self.tables.get(&table.to_lowercase())
    }

    pub fn has_column(&self, table: &str, column: &str) -> bool {
        self.columns(table)
            .is_some_and(|cols| cols.contains(&column.to_lowercase()))
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_ignore_case() {
        let mut catalog = SchemaCatalog::new();
        catalog.add_table("Orders", ["Order_ID", "amount"]);
        assert!(catalog.has_table("ORDERS"));
        assert!(catalog.has_column("orders", "order_id"));
        assert!(!catalog.has_column("orders", "price"));
        assert!(!catalog.has_column("products", "price"));
    }
}
