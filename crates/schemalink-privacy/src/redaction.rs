//! Literal redaction for database error messages.
//!
//! Error text goes back to the reasoning engine as corrective context, so
//! it keeps identifiers and structure but loses quoted literal values.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use schemalink_core::constants::REDACTED_LITERAL;

use crate::ScrubEngine;

static RE_QUOTED_LITERAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"'(?:[^']|'')*'").ok());

/// Redacts single-quoted literals, then scrubs remaining sensitive values.
pub struct LiteralRedactor {
    scrubber: Option<Arc<ScrubEngine>>,
}

impl LiteralRedactor {
    pub fn new() -> Self {
        Self { scrubber: None }
    }

    pub fn with_scrubber(scrubber: Arc<ScrubEngine>) -> Self {
        Self {
            scrubber: Some(scrubber),
        }
    }

    pub fn redact(&self, message: &str) -> String {
        let stripped = match RE_QUOTED_LITERAL.as_ref() {
            Some(re) => re.replace_all(message, REDACTED_LITERAL).into_owned(),
            None => message.to_string(),
        };
        match &self.scrubber {
            Some(scrubber) => scrubber.scrub(&stripped).text,
            None => stripped,
        }
    }
}

impl Default for LiteralRedactor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_literals_are_replaced() {
        let r = LiteralRedactor::new();
        assert_eq!(
            r.redact("invalid input syntax for type integer: 'abc''d'"),
            "invalid input syntax for type integer: '?'"
        );
    }

    #[test]
    fn identifiers_survive() {
        let r = LiteralRedactor::new();
        assert_eq!(r.redact("no such column: foo"), "no such column: foo");
        assert_eq!(
            r.redact(r#"column "emial" does not exist"#),
            r#"column "emial" does not exist"#
        );
    }

    #[test]
    fn scrubber_catches_unquoted_values() {
        let r = LiteralRedactor::with_scrubber(Arc::new(ScrubEngine::new()));
        assert_eq!(
            r.redact("duplicate key ada@example.com"),
            "duplicate key [EMAIL]"
        );
    }
}
