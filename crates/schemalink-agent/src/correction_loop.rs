//! CorrectionLoop: the per-request state machine.
//!
//! Retrieval runs once. Each generation attempt then walks Generating,
//! Validating and Executing; a recoverable failure sends the loop back to
//! Generating with the failure as corrective context until the attempt cap
//! is reached. Cancellation and the request deadline are checked before
//! every state is entered.

use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use schemalink_core::config::GenerationConfig;
use schemalink_core::errors::{ErrorCode, LoopError};
use schemalink_core::models::{AttemptRecord, ExecutionOutcome, RetrievalBundle};
use schemalink_core::traits::{IAttemptObserver, IContextAugmenter};
use schemalink_execution::GuardedExecutor;
use schemalink_generation::{PromptAssembler, StructuredGenerator};
use schemalink_guard::SqlGuard;
use schemalink_observability::tracing_setup::events;
use schemalink_observability::{attempt_span, request_span};
use schemalink_retrieval::RankFusionRetriever;
use schemalink_synthesis::SynthesisGuard;

use crate::context::RequestContext;
use crate::report::LoopReport;
use crate::state::{LoopState, Stage};

/// The collaborators one loop drives.
pub struct LoopParts {
    pub retriever: RankFusionRetriever,
    pub assembler: PromptAssembler,
    pub generator: StructuredGenerator,
    pub guard: SqlGuard,
    pub executor: GuardedExecutor,
    pub synthesis: SynthesisGuard,
}

/// Sequential per request; one instance serves any number of concurrent
/// requests since all request state lives on the stack of [`run_with`].
///
/// [`run_with`]: CorrectionLoop::run_with
pub struct CorrectionLoop {
    parts: LoopParts,
    max_attempts: usize,
    augmenter: Option<Arc<dyn IContextAugmenter>>,
    observer: Option<Arc<dyn IAttemptObserver>>,
}

/// Request-scoped state shared across steps.
struct Run<'a> {
    question: &'a str,
    ctx: &'a RequestContext,
    bundle: RetrievalBundle,
    business_context: Option<String>,
    attempts: Vec<AttemptRecord>,
    retrieval_latency_ms: u64,
}

impl CorrectionLoop {
    /// Attempt cap is `max_retries + 1`.
    pub fn new(parts: LoopParts, generation: &GenerationConfig) -> Self {
        Self {
            parts,
            max_attempts: generation.max_attempts(),
            augmenter: None,
            observer: None,
        }
    }

    /// Override the attempt cap. Never below one.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_augmenter(mut self, augmenter: Arc<dyn IContextAugmenter>) -> Self {
        self.augmenter = Some(augmenter);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn IAttemptObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Answer `question` with no cancellation and no deadline.
    pub fn run(&self, question: &str) -> LoopReport {
        self.run_with(question, &RequestContext::new())
    }

    /// Drive one request to `Done` or `Failed`. Never panics and never
    /// returns a raw error: every outcome is a report.
    pub fn run_with(&self, question: &str, ctx: &RequestContext) -> LoopReport {
        let request_id = Uuid::new_v4();
        let span = request_span!(request_id, self.max_attempts);
        let _entered = span.enter();
        let started = Instant::now();

        let mut run = Run {
            question,
            ctx,
            bundle: RetrievalBundle::default(),
            business_context: None,
            attempts: Vec::new(),
            retrieval_latency_ms: 0,
        };
        let mut stages = Vec::new();
        let mut state = LoopState::Retrieving;

        let result = loop {
            state = match state {
                LoopState::Done(answer) => {
                    stages.push(Stage::Done);
                    break Ok(answer);
                }
                LoopState::Failed(err) => {
                    stages.push(Stage::Failed);
                    break Err(err);
                }
                live => match ctx.check(live.stage().as_str()) {
                    Ok(()) => {
                        stages.push(live.stage());
                        self.step(live, &mut run)
                    }
                    Err(err) => {
                        if let Some(attempt) = live.into_pending_attempt() {
                            self.record(&mut run, attempt);
                        }
                        LoopState::Failed(err)
                    }
                },
            };
        };

        let final_stage = if result.is_ok() { Stage::Done } else { Stage::Failed };
        events::loop_terminated(
            final_stage.as_str(),
            run.attempts.len(),
            result.as_ref().err().map(|e| e.error_code()),
        );

        LoopReport {
            request_id,
            result,
            attempts: run.attempts,
            stages,
            retrieval_latency_ms: run.retrieval_latency_ms,
            total_latency_ms: started.elapsed().as_millis() as u64,
        }
    }

    fn step(&self, state: LoopState, run: &mut Run<'_>) -> LoopState {
        match state {
            LoopState::Retrieving => self.retrieve(run),
            LoopState::Generating => self.generate(run),
            LoopState::Validating(attempt) => self.validate(attempt, run),
            LoopState::Executing(attempt) => self.execute(attempt, run),
            LoopState::Synthesizing {
                success,
                executed_sql,
            } => {
                match self.parts.synthesis.synthesize(
                    run.question,
                    &success,
                    Some(executed_sql.as_str()),
                    run.attempts.len(),
                ) {
                    Ok(answer) => LoopState::Done(answer),
                    Err(e) => LoopState::Failed(LoopError::Synthesis(e)),
                }
            }
            terminal @ (LoopState::Done(_) | LoopState::Failed(_)) => terminal,
        }
    }

    fn retrieve(&self, run: &mut Run<'_>) -> LoopState {
        let started = Instant::now();
        match self.parts.retriever.retrieve_configured(run.question) {
            Ok(bundle) => {
                run.retrieval_latency_ms = started.elapsed().as_millis() as u64;
                events::retrieval_completed(
                    bundle.len(),
                    bundle.total_token_count,
                    bundle.token_budget,
                    bundle.truncated,
                    run.retrieval_latency_ms,
                );
                run.business_context = self
                    .augmenter
                    .as_ref()
                    .and_then(|a| a.augment(run.question, &bundle));
                run.bundle = bundle;
                LoopState::Generating
            }
            Err(e) => {
                run.retrieval_latency_ms = started.elapsed().as_millis() as u64;
                LoopState::Failed(LoopError::Retrieval(e))
            }
        }
    }

    fn generate(&self, run: &mut Run<'_>) -> LoopState {
        let index = run.attempts.len();
        let span = attempt_span!(index);
        let _entered = span.enter();

        let mut attempt = AttemptRecord::new(index);
        let prompt = self.parts.assembler.build_augmented(
            run.question,
            &run.bundle,
            &run.attempts,
            run.business_context.as_deref(),
        );

        let started = Instant::now();
        let generated = self.parts.generator.generate(&prompt);
        attempt.generation_latency_ms = started.elapsed().as_millis() as u64;

        match generated {
            Ok(candidate) => {
                events::candidate_generated(
                    index,
                    &candidate.raw_statement,
                    attempt.generation_latency_ms,
                );
                attempt.candidate = Some(candidate);
                LoopState::Validating(attempt)
            }
            Err(e) => {
                let reason = e.to_string();
                events::generation_failed(index, &reason);
                attempt.generation_error = Some(reason);
                self.retry_or_fail(attempt, run)
            }
        }
    }

    fn validate(&self, mut attempt: AttemptRecord, run: &mut Run<'_>) -> LoopState {
        let Some(candidate) = attempt.candidate.as_ref() else {
            attempt.generation_error = Some("no candidate reached validation".to_string());
            return self.retry_or_fail(attempt, run);
        };

        let verdict = self.parts.guard.validate(candidate);
        let safe = verdict.is_safe;
        if !safe {
            events::validation_rejected(
                attempt.attempt_index,
                verdict.violations.len(),
                &verdict.summary(),
            );
        }
        attempt.verdict = Some(verdict);

        if safe {
            LoopState::Executing(attempt)
        } else {
            self.retry_or_fail(attempt, run)
        }
    }

    fn execute(&self, mut attempt: AttemptRecord, run: &mut Run<'_>) -> LoopState {
        let Some(candidate) = attempt.verdict.as_ref().map(|v| v.candidate.clone()) else {
            attempt.generation_error = Some("no validated candidate reached execution".to_string());
            return self.retry_or_fail(attempt, run);
        };

        let executor = &self.parts.executor;
        let started = Instant::now();
        let outcome = executor.execute_with(
            &candidate,
            executor.statement_timeout(),
            &run.ctx.cancel,
            run.ctx.deadline,
        );
        let latency_ms = started.elapsed().as_millis() as u64;
        attempt.execution_latency_ms = Some(latency_ms);

        match outcome {
            ExecutionOutcome::Success(success) => {
                if success.truncated {
                    events::execution_truncated(attempt.attempt_index, success.row_count);
                }
                attempt.outcome = Some(ExecutionOutcome::Success(success.clone()));
                self.record(run, attempt);
                LoopState::Synthesizing {
                    success,
                    executed_sql: candidate.raw_statement,
                }
            }
            ExecutionOutcome::Failure(failure) => {
                events::execution_failed(
                    attempt.attempt_index,
                    &failure.error_kind.to_string(),
                    &failure.message,
                    latency_ms,
                );
                let recoverable = failure.error_kind.is_recoverable();
                attempt.outcome = Some(ExecutionOutcome::Failure(failure));
                if recoverable {
                    return self.retry_or_fail(attempt, run);
                }
                self.record(run, attempt);
                let stage = Stage::Executing.as_str().to_string();
                if !run.ctx.cancel.is_cancelled() && run.ctx.is_expired() {
                    LoopState::Failed(LoopError::DeadlineExceeded { stage })
                } else {
                    LoopState::Failed(LoopError::Cancelled { stage })
                }
            }
        }
    }

    /// Close a failed attempt. Back to Generating while the cap allows,
    /// otherwise Failed with the last failure's detail.
    fn retry_or_fail(&self, attempt: AttemptRecord, run: &mut Run<'_>) -> LoopState {
        let detail = attempt
            .failure_detail()
            .unwrap_or_else(|| "attempt failed".to_string());
        let index = attempt.attempt_index;
        self.record(run, attempt);

        if run.attempts.len() >= self.max_attempts {
            return LoopState::Failed(LoopError::RetryBudgetExhausted {
                attempts: run.attempts.len(),
                last_error: detail,
            });
        }
        events::retry_scheduled(index, self.max_attempts, &detail);
        LoopState::Generating
    }

    fn record(&self, run: &mut Run<'_>, attempt: AttemptRecord) {
        if let Some(observer) = &self.observer {
            observer.on_attempt(&attempt);
        }
        run.attempts.push(attempt);
    }
}
