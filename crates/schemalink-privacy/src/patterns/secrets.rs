use regex::Regex;
use std::sync::LazyLock;

use super::BuiltinPattern;

macro_rules! secret_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Cloud / vendor keys ────────────────────────────────────────────────────
secret_pattern!(RE_AWS_ACCESS_KEY, r"\bAKIA[0-9A-Z]{16}\b");
secret_pattern!(RE_GITHUB_TOKEN, r"\bgh[pousr]_[A-Za-z0-9]{36,}\b");
secret_pattern!(RE_SLACK_TOKEN, r"\bxox[baprs]-[A-Za-z0-9-]{10,}\b");
secret_pattern!(RE_STRIPE_KEY, r"\b[sr]k_(?:live|test)_[A-Za-z0-9]{16,}\b");
secret_pattern!(RE_OPENAI_KEY, r"\bsk-[A-Za-z0-9_-]{32,}\b");

// ── Tokens ─────────────────────────────────────────────────────────────────
secret_pattern!(
    RE_JWT,
    r"\beyJ[A-Za-z0-9_-]{10,}\.[A-Za-z0-9_-]{10,}\.[A-Za-z0-9_-]{10,}\b"
);
secret_pattern!(RE_BEARER, r"(?i)\bbearer\s+[A-Za-z0-9._~+/=-]{20,}");

// ── Private keys (PEM) ────────────────────────────────────────────────────
secret_pattern!(
    RE_PRIVATE_KEY,
    r"-----BEGIN (?:RSA |EC |DSA |OPENSSH )?PRIVATE KEY-----"
);

// ── Assignments ────────────────────────────────────────────────────────────
secret_pattern!(
    RE_PASSWORD_ASSIGN,
    r#"(?i)(?:password|passwd|pwd)\s*[=:]\s*['"]?[^'"\s]{4,}['"]?"#
);
secret_pattern!(
    RE_GENERIC_API_KEY,
    r#"(?i)(?:api[_-]?key|apikey)\s*[=:]\s*['"]?[A-Za-z0-9_\-]{16,}['"]?"#
);
secret_pattern!(
    RE_GENERIC_SECRET,
    r#"(?i)(?:secret|auth_token|access_token)\s*[=:]\s*['"]?[A-Za-z0-9_\-]{16,}['"]?"#
);

pub fn all_patterns() -> Vec<BuiltinPattern> {
    vec![
        BuiltinPattern::secret("aws_access_key", &RE_AWS_ACCESS_KEY, "[AWS_KEY]"),
        BuiltinPattern::secret("github_token", &RE_GITHUB_TOKEN, "[GITHUB_TOKEN]"),
        BuiltinPattern::secret("slack_token", &RE_SLACK_TOKEN, "[SLACK_TOKEN]"),
        BuiltinPattern::secret("stripe_key", &RE_STRIPE_KEY, "[STRIPE_KEY]"),
        BuiltinPattern::secret("openai_key", &RE_OPENAI_KEY, "[API_KEY]"),
        BuiltinPattern::secret("jwt", &RE_JWT, "[JWT]"),
        BuiltinPattern::secret("bearer_token", &RE_BEARER, "[BEARER_TOKEN]"),
        BuiltinPattern::secret("private_key", &RE_PRIVATE_KEY, "[PRIVATE_KEY]"),
        BuiltinPattern::secret("password_assignment", &RE_PASSWORD_ASSIGN, "[PASSWORD]"),
        BuiltinPattern::secret("generic_api_key", &RE_GENERIC_API_KEY, "[API_KEY]"),
        BuiltinPattern::secret("generic_secret", &RE_GENERIC_SECRET, "[SECRET]"),
    ]
}
