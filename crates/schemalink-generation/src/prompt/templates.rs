//! Fixed prompt templates.
//!
//! A template is a static slice of literal text, named slots and optional
//! sections. Rendering concatenates the pieces into a fresh string; a slot
//! with no value renders as its fallback text, and a section whose slot has
//! no value renders as nothing.

use Segment::{Optional as O, Slot as S, Text as T};

/// A substitution point in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Dialect,
    ToolName,
    SchemaContext,
    BusinessContext,
    Question,
    FailedStatement,
    FailureDetail,
    ResultRows,
    RowCount,
    TruncationNote,
}

impl Slot {
    /// Rendered when the slot has no value.
    pub fn fallback(&self) -> &'static str {
        match self {
            Self::SchemaContext => "(no schema context was retrieved)",
            Self::FailedStatement => "(no statement was produced)",
            Self::FailureDetail => "(no error detail)",
            Self::ResultRows => "[]",
            Self::RowCount => "0",
            _ => "",
        }
    }
}

/// One piece of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Text(&'static str),
    Slot(Slot),
    /// Rendered only when the slot has a non-blank value.
    Optional(Slot, &'static [Segment]),
}

/// Values for one rendering.
#[derive(Debug, Clone, Default)]
pub struct SlotValues<'a> {
    pub dialect: Option<&'a str>,
    pub tool_name: Option<&'a str>,
    pub schema_context: Option<&'a str>,
    pub business_context: Option<&'a str>,
    pub question: Option<&'a str>,
    pub failed_statement: Option<&'a str>,
    pub failure_detail: Option<&'a str>,
    pub result_rows: Option<&'a str>,
    pub row_count: Option<&'a str>,
    pub truncation_note: Option<&'a str>,
}

impl<'a> SlotValues<'a> {
    pub fn get(&self, slot: Slot) -> &'a str {
        self.value(slot).unwrap_or_else(|| slot.fallback())
    }

    /// The slot's value, `None` when unset or blank.
    pub fn value(&self, slot: Slot) -> Option<&'a str> {
        let value = match slot {
            Slot::Dialect => self.dialect,
            Slot::ToolName => self.tool_name,
            Slot::SchemaContext => self.schema_context,
            Slot::BusinessContext => self.business_context,
            Slot::Question => self.question,
            Slot::FailedStatement => self.failed_statement,
            Slot::FailureDetail => self.failure_detail,
            Slot::ResultRows => self.result_rows,
            Slot::RowCount => self.row_count,
            Slot::TruncationNote => self.truncation_note,
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

/// Render a template.
pub fn render(template: &[Segment], values: &SlotValues<'_>) -> String {
    let mut out = String::with_capacity(rendered_len(template, values));
    render_into(&mut out, template, values);
    out
}

fn rendered_len(template: &[Segment], values: &SlotValues<'_>) -> usize {
    template
        .iter()
        .map(|s| match s {
            Segment::Text(t) => t.len(),
            Segment::Slot(slot) => values.get(*slot).len(),
            Segment::Optional(slot, body) => match values.value(*slot) {
                Some(_) => rendered_len(body, values),
                None => 0,
            },
        })
        .sum()
}

fn render_into(out: &mut String, template: &[Segment], values: &SlotValues<'_>) {
    for segment in template {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Slot(slot) => out.push_str(values.get(*slot)),
            Segment::Optional(slot, body) => {
                if values.value(*slot).is_some() {
                    render_into(out, body, values);
                }
            }
        }
    }
}

/// Role, dialect and safety rules for SQL generation.
pub const SQL_SYSTEM: &[Segment] = &[
    T("You are SchemaLink, an expert "),
    S(Slot::Dialect),
    T(" query generator.\nYour sole task is to produce a single, accurate, read-only "),
    S(Slot::Dialect),
    T(" statement that answers the user's question, strictly based on the schema context provided.\n\n"),
    T("CONSTRAINTS:\n"),
    T("1. SQL DIALECT: use "),
    S(Slot::Dialect),
    T(" syntax only.\n"),
    T("2. SECURITY: the statement must start with SELECT or WITH. Never produce INSERT, UPDATE, DELETE, DROP, ALTER, TRUNCATE or GRANT, and never chain statements with ';'.\n"),
    T("3. SCHEMA ACCURACY: use only the tables and columns listed in the schema context.\n"),
    T("4. FOREIGN KEYS (JOINs): build JOINs from the foreign key relationships listed in the schema context.\n\n"),
    T("SELF-CRITIQUE: if you select columns from two different tables, make sure they are joined through a listed foreign key.\n\n"),
    T("OUTPUT: call the `"),
    S(Slot::ToolName),
    T("` tool exactly once with the statement and the dialect. Do not answer in prose."),
];

/// Present when a business-context collaborator contributed text.
const BUSINESS_CONTEXT_SECTION: &[Segment] = &[
    T("\n--- BUSINESS CONTEXT ---\n"),
    S(Slot::BusinessContext),
    T("\n"),
];

/// First attempt.
pub const SQL_USER: &[Segment] = &[
    T("--- SCHEMA CONTEXT ---\n"),
    S(Slot::SchemaContext),
    T("\n\n--- USER QUESTION ---\n"),
    S(Slot::Question),
    T("\n"),
    O(Slot::BusinessContext, BUSINESS_CONTEXT_SECTION),
];

/// Retry after a failure: the failed statement and the latest error, then
/// the original context and question.
pub const SQL_CORRECTION_USER: &[Segment] = &[
    T("The previous statement failed.\n\n"),
    T("FAILED STATEMENT:\n"),
    S(Slot::FailedStatement),
    T("\n\nERROR:\n"),
    S(Slot::FailureDetail),
    T("\n\nAnalyse the error. It usually points at a missing column, a forgotten JOIN, or invalid syntax. "),
    T("Based on the original question and the schema context below (still valid), call the tool again with a single corrected statement.\n\n"),
    T("--- SCHEMA CONTEXT (original) ---\n"),
    S(Slot::SchemaContext),
    T("\n\n--- USER QUESTION (original) ---\n"),
    S(Slot::Question),
    T("\n"),
    O(Slot::BusinessContext, BUSINESS_CONTEXT_SECTION),
];

/// Grounding rules for answer synthesis.
pub const SYNTHESIS_SYSTEM: &[Segment] = &[
    T("You turn query results into a concise natural-language answer.\n\n"),
    T("GROUNDING CONSTRAINT: your answer must only be derived from the rows provided. "),
    T("Do not infer, invent or speculate about values, trends or external factors that are not present in the rows. "),
    T("Quote numbers and names exactly as they appear in the rows. "),
    T("If the rows do not contain the full answer, say: \"The result set does not contain sufficient information to fully answer that.\""),
];

/// The question and the (scrubbed) rows.
pub const SYNTHESIS_USER: &[Segment] = &[
    T("A user asked: \""),
    S(Slot::Question),
    T("\"\n\nThe executed query returned "),
    S(Slot::RowCount),
    T(" row(s) (JSON):\n"),
    S(Slot::ResultRows),
    T("\n"),
    O(Slot::TruncationNote, &[T("\n"), S(Slot::TruncationNote), T("\n")]),
];

/// Value for [`Slot::TruncationNote`] when the row ceiling cut the result.
pub const TRUNCATION_NOTE: &str =
    "The result was truncated at the row ceiling; say that the answer covers only the rows shown.";

/// Deterministic answer for an empty result. Never sent to the engine.
pub const EMPTY_RESULT_ANSWER: &[Segment] = &[
    T("No matching data: the query for \""),
    S(Slot::Question),
    T("\" ran successfully but returned no rows."),
];
