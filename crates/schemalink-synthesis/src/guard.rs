//! SynthesisGuard: grounded, scrubbed final answers.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use schemalink_core::config::SynthesisConfig;
use schemalink_core::errors::SynthesisError;
use schemalink_core::models::{ExecutionSuccess, FinalAnswer, Prompt};
use schemalink_core::traits::{IReasoningEngine, ITokenizer};
use schemalink_generation::prompt::templates::{
    render, SlotValues, EMPTY_RESULT_ANSWER, SYNTHESIS_SYSTEM, SYNTHESIS_USER, TRUNCATION_NOTE,
};
use schemalink_observability::tracing_setup::events;
use schemalink_privacy::ScrubEngine;

use crate::grounding::GroundingVerifier;
use crate::table::render_table;

/// Turns a successful execution into the caller's answer.
pub struct SynthesisGuard {
    engine: Arc<dyn IReasoningEngine>,
    scrubber: Arc<ScrubEngine>,
    tokenizer: Arc<dyn ITokenizer>,
    config: SynthesisConfig,
    scrub_results: bool,
}

impl SynthesisGuard {
    pub fn new(
        engine: Arc<dyn IReasoningEngine>,
        scrubber: Arc<ScrubEngine>,
        tokenizer: Arc<dyn ITokenizer>,
        config: SynthesisConfig,
    ) -> Self {
        Self {
            engine,
            scrubber,
            tokenizer,
            config,
            scrub_results: true,
        }
    }

    /// Whether row values are scrubbed before the engine sees them. The
    /// final answer is scrubbed regardless.
    pub fn with_result_scrubbing(mut self, enabled: bool) -> Self {
        self.scrub_results = enabled;
        self
    }

    /// Answer `question` from `success`.
    ///
    /// An empty row set gets the fixed no-data answer without an engine
    /// call. `executed_sql` is kept only when `include_sql` is set.
    pub fn synthesize(
        &self,
        question: &str,
        success: &ExecutionSuccess,
        executed_sql: Option<&str>,
        attempt_count: usize,
    ) -> Result<FinalAnswer, SynthesisError> {
        let executed_sql = executed_sql
            .filter(|_| self.config.include_sql)
            .map(str::to_string);

        if success.rows.is_empty() {
            info!("empty result, using no-data answer");
            let values = SlotValues {
                question: Some(question),
                ..Default::default()
            };
            return Ok(FinalAnswer {
                text: self.scrub_answer(&render(EMPTY_RESULT_ANSWER, &values)),
                executed_sql,
                attempt_count,
                truncated: success.truncated,
            });
        }

        let rows = if self.scrub_results {
            let (rows, redactions) = self.scrubber.scrub_rows(&success.rows);
            if redactions > 0 {
                events::sensitive_value_scrubbed("result_rows", redactions);
            }
            rows
        } else {
            success.rows.clone()
        };

        let prompt = self.prompt(question, &success.columns, &rows, success.truncated)?;
        debug!(tokens = prompt.token_count, "synthesis prompt built");
        let raw = self.engine.complete(&prompt)?;
        if raw.trim().is_empty() {
            return Err(SynthesisError::EmptyAnswer);
        }

        let mut text = raw.trim().to_string();
        if self.config.enforce_grounding {
            let verifier =
                GroundingVerifier::new(question, &success.columns, &rows, success.row_count);
            let report = verifier.verify(&text);
            if !report.is_grounded() {
                warn!(
                    ungrounded = report.ungrounded.len(),
                    checked = report.checked,
                    "answer cites values absent from the rows, falling back to table"
                );
                text = render_table(
                    &success.columns,
                    &rows,
                    self.config.max_rows_in_prompt,
                    success.truncated,
                );
            }
        }

        Ok(FinalAnswer {
            text: self.scrub_answer(&text),
            executed_sql,
            attempt_count,
            truncated: success.truncated,
        })
    }

    fn prompt(
        &self,
        question: &str,
        columns: &[String],
        rows: &[Vec<Value>],
        truncated: bool,
    ) -> Result<Prompt, SynthesisError> {
        let shown = &rows[..rows.len().min(self.config.max_rows_in_prompt)];
        let records: Vec<serde_json::Map<String, Value>> = shown
            .iter()
            .map(|row| columns.iter().cloned().zip(row.iter().cloned()).collect())
            .collect();
        let rows_json =
            serde_json::to_string_pretty(&records).map_err(|e| SynthesisError::Serialization {
                reason: e.to_string(),
            })?;
        let row_count = rows.len().to_string();
        let cut = truncated || shown.len() < rows.len();

        let values = SlotValues {
            question: Some(question),
            result_rows: Some(&rows_json),
            row_count: Some(&row_count),
            truncation_note: cut.then_some(TRUNCATION_NOTE),
            ..Default::default()
        };
        let system = render(SYNTHESIS_SYSTEM, &values);
        let user = render(SYNTHESIS_USER, &values);
        let token_count = self.tokenizer.count(&system) + self.tokenizer.count(&user);
        Ok(Prompt {
            system,
            user,
            token_count,
        })
    }

    fn scrub_answer(&self, text: &str) -> String {
        let sanitized = self.scrubber.scrub(text);
        if !sanitized.redactions.is_empty() {
            events::sensitive_value_scrubbed("answer", sanitized.redactions.len());
        }
        sanitized.text
    }
}
