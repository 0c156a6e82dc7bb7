//! Deterministic tabular rendering of a row set, used when an answer fails
//! grounding. Every value in it comes straight from the rows.

use std::fmt::Write as _;

use serde_json::Value;

/// Markdown table of at most `max_rows` rows.
pub fn render_table(
    columns: &[String],
    rows: &[Vec<Value>],
    max_rows: usize,
    truncated: bool,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "The query returned {} row(s):", rows.len());
    if columns.is_empty() {
        return out.trim_end().to_string();
    }
    out.push('\n');
    let _ = writeln!(out, "| {} |", columns.iter().map(|c| escape(c)).collect::<Vec<_>>().join(" | "));
    let _ = writeln!(out, "|{}|", vec![" --- "; columns.len()].join("|"));
    for row in rows.iter().take(max_rows) {
        let cells: Vec<String> = row.iter().map(cell_text).collect();
        let _ = writeln!(out, "| {} |", cells.join(" | "));
    }
    if rows.len() > max_rows {
        let _ = writeln!(out, "\n({} more row(s) not shown)", rows.len() - max_rows);
    }
    if truncated {
        let _ = writeln!(out, "\nThe result was cut at the row ceiling; more rows may exist.");
    }
    out.trim_end().to_string()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(s) => escape(s),
        other => other.to_string(),
    }
}

fn escape(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
