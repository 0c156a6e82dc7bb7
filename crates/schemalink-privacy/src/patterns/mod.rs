pub mod connection_strings;
pub mod pii;
pub mod secrets;

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    ConnectionString,
    Secret,
    Pii,
    Custom,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ConnectionString => "connection_string",
            Self::Secret => "secret",
            Self::Pii => "pii",
            Self::Custom => "custom",
        })
    }
}

/// A compiled-once built-in matcher.
pub struct BuiltinPattern {
    pub name: &'static str,
    pub category: Category,
    pub regex: &'static LazyLock<Option<Regex>>,
    pub placeholder: &'static str,
}

impl BuiltinPattern {
    fn pii(
        name: &'static str,
        regex: &'static LazyLock<Option<Regex>>,
        placeholder: &'static str,
    ) -> Self {
        Self { name, category: Category::Pii, regex, placeholder }
    }

    fn secret(
        name: &'static str,
        regex: &'static LazyLock<Option<Regex>>,
        placeholder: &'static str,
    ) -> Self {
        Self { name, category: Category::Secret, regex, placeholder }
    }

    fn connection(
        name: &'static str,
        regex: &'static LazyLock<Option<Regex>>,
        placeholder: &'static str,
    ) -> Self {
        Self { name, category: Category::ConnectionString, regex, placeholder }
    }
}

/// Every built-in matcher in scan order. Connection strings come first since
/// `user:pass@host` also looks like an email; PII is broadest and goes last.
pub fn builtin_patterns() -> Vec<BuiltinPattern> {
    let mut all = connection_strings::all_patterns();
    all.extend(secrets::all_patterns());
    all.extend(pii::all_patterns());
    all
}

/// One match before replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    pub category: Category,
    pub pattern_name: String,
    pub placeholder: String,
    pub start: usize,
    pub end: usize,
}

/// Sort descending by start, then drop overlaps keeping the longer match.
/// A span matched by several patterns keeps the first in scan order.
pub fn resolve_overlaps(mut matches: Vec<RawMatch>) -> Vec<RawMatch> {
    matches.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));
    let mut kept: Vec<RawMatch> = Vec::with_capacity(matches.len());
    for m in matches {
        let mut dominated = false;
        while let Some(last) = kept.last() {
            if m.end <= last.start {
                break;
            }
            if m.end - m.start > last.end - last.start {
                kept.pop();
            } else {
                dominated = true;
                break;
            }
        }
        if !dominated {
            kept.push(m);
        }
    }
    kept
}
