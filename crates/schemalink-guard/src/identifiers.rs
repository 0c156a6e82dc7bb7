//! AST walk collecting everything the guard checks after parsing.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::ControlFlow;

use sqlparser::ast::{
    Expr, ObjectName, Query, SelectItem, SetExpr, Statement, TableFactor, Visitor,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AliasTarget {
    Table(String),
    /// Derived table; its columns are not in the catalog.
    Opaque,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnRef {
    pub qualifier: Option<String>,
    pub name: String,
}

impl ColumnRef {
    pub fn display(&self) -> String {
        match &self.qualifier {
            Some(q) => format!("{q}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// All names are lowercased.
#[derive(Debug, Default)]
pub(crate) struct ReferenceCollector {
    pub tables: BTreeSet<String>,
    pub ctes: BTreeSet<String>,
    pub aliases: BTreeMap<String, AliasTarget>,
    pub projection_aliases: BTreeSet<String>,
    pub columns: Vec<ColumnRef>,
    /// Leading keyword of every statement that is not a plain query.
    pub forbidden: Vec<String>,
    pub write_clauses: Vec<String>,
}

impl ReferenceCollector {
    fn inspect_body(&mut self, body: &SetExpr) {
        match body {
            SetExpr::Select(select) => {
                if select.into.is_some() {
                    self.write_clauses
                        .push("SELECT ... INTO creates a table".to_string());
                }
                for item in &select.projection {
                    if let SelectItem::ExprWithAlias { alias, .. } = item {
                        self.projection_aliases.insert(alias.value.to_lowercase());
                    }
                }
            }
            SetExpr::SetOperation { left, right, .. } => {
                self.inspect_body(left);
                self.inspect_body(right);
            }
            // Nested queries are visited on their own.
            _ => {}
        }
    }
}

impl Visitor for ReferenceCollector {
    type Break = ();

    fn pre_visit_query(&mut self, query: &Query) -> ControlFlow<Self::Break> {
        if let Some(with) = &query.with {
            for cte in &with.cte_tables {
                self.ctes.insert(cte.alias.name.value.to_lowercase());
            }
        }
        if !query.locks.is_empty() {
            self.write_clauses
                .push("row locking clause (FOR UPDATE / FOR SHARE)".to_string());
        }
        self.inspect_body(&query.body);
        ControlFlow::Continue(())
    }

    fn pre_visit_relation(&mut self, relation: &ObjectName) -> ControlFlow<Self::Break> {
        if let Some(last) = relation.0.last() {
            self.tables.insert(last.value.to_lowercase());
        }
        ControlFlow::Continue(())
    }

    fn pre_visit_table_factor(&mut self, table_factor: &TableFactor) -> ControlFlow<Self::Break> {
        match table_factor {
            TableFactor::Table {
                name,
                alias: Some(alias),
                ..
            } => {
                if let Some(last) = name.0.last() {
                    self.aliases.insert(
                        alias.name.value.to_lowercase(),
                        AliasTarget::Table(last.value.to_lowercase()),
                    );
                }
            }
            TableFactor::Derived {
                alias: Some(alias), ..
            } => {
                self.aliases
                    .insert(alias.name.value.to_lowercase(), AliasTarget::Opaque);
            }
            _ => {}
        }
        ControlFlow::Continue(())
    }

    fn pre_visit_expr(&mut self, expr: &Expr) -> ControlFlow<Self::Break> {
        match expr {
            Expr::Identifier(ident) => self.columns.push(ColumnRef {
                qualifier: None,
                name: ident.value.to_lowercase(),
            }),
            Expr::CompoundIdentifier(parts) if parts.len() >= 2 => {
                let n = parts.len();
                self.columns.push(ColumnRef {
                    qualifier: Some(parts[n - 2].value.to_lowercase()),
                    name: parts[n - 1].value.to_lowercase(),
                });
            }
            _ => {}
        }
        ControlFlow::Continue(())
    }

    fn pre_visit_statement(&mut self, statement: &Statement) -> ControlFlow<Self::Break> {
        if !matches!(statement, Statement::Query(_)) {
            self.forbidden.push(statement_keyword(statement));
        }
        ControlFlow::Continue(())
    }
}

/// Leading keyword of the rendered statement, e.g. `DROP`.
pub(crate) fn statement_keyword(statement: &Statement) -> String {
    statement
        .to_string()
        .split_whitespace()
        .next()
        .unwrap_or("UNKNOWN")
        .to_uppercase()
}
