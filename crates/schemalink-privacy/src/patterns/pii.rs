use regex::Regex;
use std::sync::LazyLock;

use super::BuiltinPattern;

macro_rules! pii_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

pii_pattern!(
    RE_EMAIL,
    r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}"
);
pii_pattern!(RE_SSN, r"\b\d{3}-\d{2}-\d{4}\b");
pii_pattern!(
    RE_CREDIT_CARD,
    r"\b(?:4\d{3}|5[1-5]\d{2}|3[47]\d{2}|6(?:011|5\d{2}))[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{3,4}\b"
);
pii_pattern!(
    RE_IBAN,
    r"\b[A-Z]{2}\d{2}[A-Z0-9]{4}\d{7}(?:[A-Z0-9]?\d{0,16})\b"
);
pii_pattern!(
    RE_IPV4,
    r"\b(?:(?:25[0-5]|2[0-4]\d|[01]?\d\d?)\.){3}(?:25[0-5]|2[0-4]\d|[01]?\d\d?)\b"
);
pii_pattern!(
    RE_PHONE,
    r"(?:\+\d{1,3}[-.\s]?)?\(\d{3}\)[-.\s]?\d{3}[-.\s]?\d{4}\b|\b\d{3}[-.]\d{3}[-.]\d{4}\b"
);

/// PII matchers, most specific first.
pub fn all_patterns() -> Vec<BuiltinPattern> {
    vec![
        BuiltinPattern::pii("email", &RE_EMAIL, "[EMAIL]"),
        BuiltinPattern::pii("ssn", &RE_SSN, "[SSN]"),
        BuiltinPattern::pii("credit_card", &RE_CREDIT_CARD, "[CREDIT_CARD]"),
        BuiltinPattern::pii("iban", &RE_IBAN, "[IBAN]"),
        BuiltinPattern::pii("ipv4", &RE_IPV4, "[IP_ADDRESS]"),
        BuiltinPattern::pii("phone", &RE_PHONE, "[PHONE]"),
    ]
}
