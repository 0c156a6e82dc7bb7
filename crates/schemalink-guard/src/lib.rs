//! # schemalink-guard
//!
//! Static safety validation of generated SQL. Parses with `sqlparser`, so
//! every check is structural: a forbidden statement nested in a CTE is found
//! the same way as one at the top level.

pub mod catalog;
pub mod dialect;
pub mod guard;
mod identifiers;
mod limit;

pub use catalog::SchemaCatalog;
pub use guard::SqlGuard;
