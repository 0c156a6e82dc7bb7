//! # schemalink-privacy
//!
//! Regex matchers for PII, secrets and connection strings, a scrub engine
//! that replaces matches with placeholders, and the literal redaction policy
//! applied to database error messages.

pub mod engine;
pub mod patterns;
pub mod redaction;

pub use engine::ScrubEngine;
pub use redaction::LiteralRedactor;
