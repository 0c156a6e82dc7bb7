//! SqlGuard: parse, collect every violation, inject the row cap.

use std::collections::BTreeSet;
use std::sync::Arc;

use sqlparser::ast::{Statement, Visit};
use sqlparser::parser::Parser;
use tracing::{debug, info};

use schemalink_core::config::{ExecutionConfig, GuardConfig};
use schemalink_core::models::{SqlCandidate, ValidationVerdict, Violation, ViolationKind};

use crate::catalog::SchemaCatalog;
use crate::dialect::parser_dialect;
use crate::identifiers::{AliasTarget, ReferenceCollector};
use crate::limit::{enforce_row_cap, LimitAction};

pub struct SqlGuard {
    catalog: Arc<SchemaCatalog>,
    check_identifiers: bool,
    /// Injected `LIMIT`; one above the execution ceiling so truncation is observable.
    row_cap: u64,
}

impl SqlGuard {
    pub fn new(catalog: Arc<SchemaCatalog>, guard: &GuardConfig, execution: &ExecutionConfig) -> Self {
        Self {
            catalog,
            check_identifiers: guard.check_identifiers,
            row_cap: execution.injected_limit(),
        }
    }

    pub fn row_cap(&self) -> u64 {
        self.row_cap
    }

    /// Validate one candidate. Violations are collected, not short-circuited.
    /// `is_safe` is true iff no violation remains after the row cap step.
    pub fn validate(&self, candidate: &SqlCandidate) -> ValidationVerdict {
        debug!(statement = %candidate.raw_statement, "validating candidate");
        let mut violations = Vec::new();
        let mut rewritten = candidate.clone();
        let mut limit_injected = false;

        let sql = candidate.raw_statement.trim();
        if sql.trim_matches(|c: char| c == ';' || c.is_whitespace()).is_empty() {
            violations.push(Violation::new(
                ViolationKind::EmptyStatement,
                "the statement is empty",
            ));
            return finish(violations, rewritten, false);
        }

        let dialect = parser_dialect(candidate.dialect);
        let mut statements = match Parser::parse_sql(dialect.as_ref(), sql) {
            Ok(statements) => statements,
            Err(e) => {
                violations.push(Violation::new(ViolationKind::ParseFailure, e.to_string()));
                return finish(violations, rewritten, false);
            }
        };
        if statements.is_empty() {
            violations.push(Violation::new(
                ViolationKind::EmptyStatement,
                "the statement is empty",
            ));
            return finish(violations, rewritten, false);
        }

        let total = statements.len();
        for (i, extra) in statements.iter().enumerate().skip(1) {
            violations.push(Violation::new(
                ViolationKind::MultipleStatements,
                format!(
                    "statement {} of {total} (`{extra}`) follows the first; exactly one statement is allowed",
                    i + 1
                ),
            ));
        }

        for statement in &statements {
            self.inspect(statement, &mut violations);
        }

        if total == 1 {
            if let Statement::Query(query) = &mut statements[0] {
                match enforce_row_cap(query, self.row_cap) {
                    LimitAction::Kept => {}
                    action => {
                        debug!(?action, cap = self.row_cap, "row cap applied");
                        rewritten.raw_statement = statements[0].to_string();
                        limit_injected = true;
                    }
                }
            }
        }

        finish(violations, rewritten, limit_injected)
    }

    fn inspect(&self, statement: &Statement, violations: &mut Vec<Violation>) {
        let mut refs = ReferenceCollector::default();
        let _ = statement.visit(&mut refs);

        for keyword in &refs.forbidden {
            violations.push(Violation::new(
                ViolationKind::ForbiddenStatement,
                format!("{keyword} is not allowed; only read-only queries may run"),
            ));
        }
        for clause in &refs.write_clauses {
            violations.push(Violation::new(ViolationKind::WriteClause, clause.clone()));
        }
        if self.check_identifiers {
            self.check_identifiers(&refs, violations);
        }
    }

    fn check_identifiers(&self, refs: &ReferenceCollector, violations: &mut Vec<Violation>) {
        let unknown_tables: BTreeSet<&String> = refs
            .tables
            .iter()
            .filter(|t| !self.catalog.has_table(t) && !refs.ctes.contains(*t))
            .collect();
        for table in &unknown_tables {
            violations.push(Violation::new(
                ViolationKind::UnknownTable,
                format!("table `{table}` does not exist in the schema"),
            ));
        }

        // Columns visible to unqualified references.
        let mut visible: BTreeSet<&str> = refs.projection_aliases.iter().map(String::as_str).collect();
        for table in &refs.tables {
            if let Some(cols) = self.catalog.columns(table) {
                visible.extend(cols.iter().map(String::as_str));
            }
        }

        let mut reported = BTreeSet::new();
        for column in &refs.columns {
            let problem = match &column.qualifier {
                None => {
                    // Unknown tables make the visible set incomplete.
                    if !unknown_tables.is_empty() || visible.contains(column.name.as_str()) {
                        None
                    } else {
                        Some((
                            ViolationKind::UnknownColumn,
                            format!("column `{}` does not exist in the referenced tables", column.name),
                        ))
                    }
                }
                Some(qualifier) => self.check_qualified(refs, &visible, qualifier, &column.name),
            };
            if let Some((kind, detail)) = problem {
                if reported.insert(column.display()) {
                    violations.push(Violation::new(kind, detail));
                }
            }
        }
    }

    fn check_qualified(
        &self,
        refs: &ReferenceCollector,
        visible: &BTreeSet<&str>,
        qualifier: &str,
        column: &str,
    ) -> Option<(ViolationKind, String)> {
        let table = match refs.aliases.get(qualifier) {
            Some(AliasTarget::Table(table)) => Some(table.as_str()),
            Some(AliasTarget::Opaque) => None,
            None if refs.ctes.contains(qualifier) => None,
            None if refs.tables.contains(qualifier) => Some(qualifier),
            None => {
                return Some((
                    ViolationKind::UnknownTable,
                    format!("`{qualifier}.{column}` references unknown table or alias `{qualifier}`"),
                ));
            }
        };
        match table {
            // Reported as an unknown table already.
            Some(t) if !self.catalog.has_table(t) => None,
            Some(t) if self.catalog.has_column(t, column) => None,
            Some(t) => Some((
                ViolationKind::UnknownColumn,
                format!("column `{column}` does not exist in table `{t}`"),
            )),
            None if visible.contains(column) => None,
            None => Some((
                ViolationKind::UnknownColumn,
                format!("column `{qualifier}.{column}` is not produced by `{qualifier}`"),
            )),
        }
    }
}

fn finish(violations: Vec<Violation>, candidate: SqlCandidate, limit_injected: bool) -> ValidationVerdict {
    let is_safe = violations.is_empty();
    if !is_safe {
        info!(
            violations = violations.len(),
            first = %violations[0],
            "candidate rejected by guard"
        );
    }
    ValidationVerdict {
        is_safe,
        violations,
        candidate,
        limit_injected,
    }
}
