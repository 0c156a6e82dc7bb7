use std::fmt;

use serde::{Deserialize, Serialize};

use super::SqlCandidate;

/// Category of a guard violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    EmptyStatement,
    ParseFailure,
    MultipleStatements,
    ForbiddenStatement,
    WriteClause,
    UnknownTable,
    UnknownColumn,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyStatement => "empty statement",
            Self::ParseFailure => "parse failure",
            Self::MultipleStatements => "multiple statements",
            Self::ForbiddenStatement => "forbidden statement",
            Self::WriteClause => "write clause",
            Self::UnknownTable => "unknown table",
            Self::UnknownColumn => "unknown column",
        }
    }
}

/// One problem found by the guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub detail: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.detail)
    }
}

/// Guard result. `is_safe` is true iff `violations` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    pub is_safe: bool,
    pub violations: Vec<Violation>,
    /// The candidate to execute: rewritten when a row cap was injected.
    pub candidate: SqlCandidate,
    pub limit_injected: bool,
}

impl ValidationVerdict {
    pub fn has(&self, kind: ViolationKind) -> bool {
        self.violations.iter().any(|v| v.kind == kind)
    }

    /// All violations on one line, for corrective prompts and logs.
    pub fn summary(&self) -> String {
        self.violations
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}
