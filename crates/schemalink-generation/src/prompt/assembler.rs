//! PromptAssembler: deterministic prompt construction.

use std::sync::Arc;

use schemalink_core::constants::SQL_TOOL_NAME;
use schemalink_core::models::{AttemptRecord, Prompt, RetrievalBundle, SqlDialect};
use schemalink_core::traits::ITokenizer;

use super::templates::{
    render, SlotValues, SQL_CORRECTION_USER, SQL_SYSTEM, SQL_USER,
};

/// Separator between serialized schema chunks.
const CHUNK_SEPARATOR: &str = "\n\n";

/// Builds generation prompts. A pure function of its inputs: the same
/// question, bundle and attempts always give the same prompt.
pub struct PromptAssembler {
    dialect: SqlDialect,
    tokenizer: Arc<dyn ITokenizer>,
}

impl PromptAssembler {
    /// `tokenizer` must be the one retrieval budgets with.
    pub fn new(dialect: SqlDialect, tokenizer: Arc<dyn ITokenizer>) -> Self {
        Self { dialect, tokenizer }
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    pub fn build(
        &self,
        question: &str,
        bundle: &RetrievalBundle,
        prior_attempts: &[AttemptRecord],
    ) -> Prompt {
        self.build_augmented(question, bundle, prior_attempts, None)
    }

    /// As [`build`](Self::build), with optional business context rendered
    /// as the last section of the user message.
    pub fn build_augmented(
        &self,
        question: &str,
        bundle: &RetrievalBundle,
        prior_attempts: &[AttemptRecord],
        business_context: Option<&str>,
    ) -> Prompt {
        let schema_context = serialize_bundle(bundle);
        let latest = latest_failure(prior_attempts);

        let values = SlotValues {
            dialect: Some(self.dialect.display_name()),
            tool_name: Some(SQL_TOOL_NAME),
            schema_context: Some(&schema_context),
            business_context,
            question: Some(question),
            failed_statement: latest.as_ref().and_then(|(stmt, _)| *stmt),
            failure_detail: latest.as_ref().map(|(_, detail)| detail.as_str()),
            ..Default::default()
        };

        let system = render(SQL_SYSTEM, &values);
        let user = match latest {
            Some(_) => render(SQL_CORRECTION_USER, &values),
            None => render(SQL_USER, &values),
        };

        let token_count = self.tokenizer.count(&system) + self.tokenizer.count(&user);
        Prompt {
            system,
            user,
            token_count,
        }
    }
}

/// Chunk texts in bundle order.
pub fn serialize_bundle(bundle: &RetrievalBundle) -> String {
    bundle
        .chunks
        .iter()
        .map(|c| c.text.trim_end())
        .collect::<Vec<_>>()
        .join(CHUNK_SEPARATOR)
}

/// The most recent failed attempt's statement and detail. Earlier failures
/// never reach the prompt.
fn latest_failure(attempts: &[AttemptRecord]) -> Option<(Option<&str>, String)> {
    attempts.iter().rev().find_map(|a| {
        a.failure_detail().map(|detail| {
            let statement = a.candidate.as_ref().map(|c| c.raw_statement.as_str());
            (statement, detail)
        })
    })
}
