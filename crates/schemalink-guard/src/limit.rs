//! Row cap injection on the outermost query.

use sqlparser::ast::{Expr, Query, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LimitAction {
    /// Existing limit already within the cap, or a FETCH clause is present.
    Kept,
    Injected,
    /// Existing limit was larger than the cap or not a plain number.
    Clamped,
}

pub(crate) fn enforce_row_cap(query: &mut Query, cap: u64) -> LimitAction {
    if query.fetch.is_some() {
        return LimitAction::Kept;
    }
    let action = match &query.limit {
        None => LimitAction::Injected,
        Some(Expr::Value(Value::Number(n, _))) => match n.parse::<u64>() {
            Ok(v) if v <= cap => LimitAction::Kept,
            _ => LimitAction::Clamped,
        },
        Some(_) => LimitAction::Clamped,
    };
    if action != LimitAction::Kept {
        query.limit = Some(Expr::Value(Value::Number(cap.to_string(), false)));
    }
    action
}
