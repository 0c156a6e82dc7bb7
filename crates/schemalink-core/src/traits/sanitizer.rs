use serde::{Deserialize, Serialize};

/// Result of sanitization with metadata about what was redacted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizedText {
    pub text: String,
    pub redactions: Vec<Redaction>,
}

/// A single redaction applied during sanitization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Redaction {
    pub category: String,
    pub placeholder: String,
    pub start: usize,
    pub end: usize,
}

/// Replaces sensitive values with placeholders.
pub trait ISanitizer: Send + Sync {
    fn sanitize(&self, text: &str) -> SanitizedText;
}
