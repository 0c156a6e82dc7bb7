//! SchemaLink: one object wiring every subsystem from configuration.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use schemalink_core::config::SchemaLinkConfig;
use schemalink_core::errors::{ConfigError, SchemaLinkResult};
use schemalink_core::models::TableSchema;
use schemalink_core::traits::{
    IAttemptObserver, IContextAugmenter, IEmbeddingProvider, IReadOnlyDatabase, IReasoningEngine,
};
use schemalink_execution::{GuardedExecutor, SqliteDatabase};
use schemalink_generation::{OpenAiCompatibleEngine, PromptAssembler, StructuredGenerator};
use schemalink_guard::{SchemaCatalog, SqlGuard};
use schemalink_privacy::{LiteralRedactor, ScrubEngine};
use schemalink_retrieval::{HashedTfEmbedder, InMemorySchemaIndex, RankFusionRetriever};
use schemalink_synthesis::SynthesisGuard;
use schemalink_tokens::tokenizer_from_config;

use crate::context::RequestContext;
use crate::correction_loop::{CorrectionLoop, LoopParts};
use crate::report::LoopReport;

/// Options for building a [`SchemaLink`].
///
/// Anything left `None` is built from `config`: the engine becomes the
/// OpenAI-compatible adapter, the embedder the hashed term-frequency one,
/// and the database a read-only SQLite pool over `database_path`.
#[derive(Default)]
pub struct SchemaLinkOptions {
    pub config: SchemaLinkConfig,
    /// Tables to index. Also the guard's schema snapshot.
    pub tables: Vec<TableSchema>,
    pub database_path: Option<PathBuf>,
    pub database: Option<Arc<dyn IReadOnlyDatabase>>,
    pub engine: Option<Arc<dyn IReasoningEngine>>,
    pub embedder: Option<Arc<dyn IEmbeddingProvider>>,
    pub augmenter: Option<Arc<dyn IContextAugmenter>>,
    pub observer: Option<Arc<dyn IAttemptObserver>>,
}

/// Question in, grounded answer (or structured failure) out.
pub struct SchemaLink {
    correction_loop: CorrectionLoop,
    catalog: Arc<SchemaCatalog>,
    config: SchemaLinkConfig,
}

impl SchemaLink {
    pub fn new(opts: SchemaLinkOptions) -> SchemaLinkResult<Self> {
        let SchemaLinkOptions {
            config,
            tables,
            database_path,
            database,
            engine,
            embedder,
            augmenter,
            observer,
        } = opts;
        config.validate()?;

        let tokenizer =
            tokenizer_from_config(&config.retrieval).map_err(|e| ConfigError::InvalidValue {
                field: "retrieval.tokenizer".to_string(),
                message: e.to_string(),
            })?;

        // Index and catalog come from the same tables so the guard never
        // accepts a table retrieval could not have shown.
        let embedder: Arc<dyn IEmbeddingProvider> =
            embedder.unwrap_or_else(|| Arc::new(HashedTfEmbedder::default()));
        let index = InMemorySchemaIndex::from_tables(&tables, embedder.as_ref())?;
        let catalog = Arc::new(SchemaCatalog::from_tables(&tables));

        let database: Arc<dyn IReadOnlyDatabase> = match (database, database_path) {
            (Some(db), _) => db,
            (None, Some(path)) => Arc::new(SqliteDatabase::open(&path, &config.execution)?),
            (None, None) => {
                return Err(ConfigError::InvalidValue {
                    field: "database".to_string(),
                    message: "either a database or a database path is required".to_string(),
                }
                .into())
            }
        };
        let dialect = config.generation.dialect;
        if database.dialect() != dialect {
            warn!(
                configured = %dialect,
                database = %database.dialect(),
                "configured dialect differs from the database dialect"
            );
        }

        let engine: Arc<dyn IReasoningEngine> = match engine {
            Some(engine) => engine,
            None => Arc::new(OpenAiCompatibleEngine::from_config(&config.generation)?),
        };

        let scrubber = Arc::new(ScrubEngine::from_config(&config.privacy)?);
        let redactor = config
            .execution
            .redact_error_literals
            .then(|| LiteralRedactor::with_scrubber(scrubber.clone()));

        let parts = LoopParts {
            retriever: RankFusionRetriever::new(
                Arc::new(index),
                embedder,
                tokenizer.clone(),
                config.retrieval.clone(),
            ),
            assembler: PromptAssembler::new(dialect, tokenizer.clone()),
            generator: StructuredGenerator::new(engine.clone(), dialect),
            guard: SqlGuard::new(catalog.clone(), &config.guard, &config.execution),
            executor: GuardedExecutor::new(database, config.execution.clone())
                .with_redactor(redactor),
            synthesis: SynthesisGuard::new(engine, scrubber, tokenizer, config.synthesis.clone())
                .with_result_scrubbing(config.privacy.scrub_results),
        };

        let mut correction_loop = CorrectionLoop::new(parts, &config.generation);
        if let Some(augmenter) = augmenter {
            correction_loop = correction_loop.with_augmenter(augmenter);
        }
        if let Some(observer) = observer {
            correction_loop = correction_loop.with_observer(observer);
        }

        info!(
            tables = catalog.len(),
            dialect = %dialect,
            max_attempts = correction_loop.max_attempts(),
            "schemalink ready"
        );
        Ok(Self {
            correction_loop,
            catalog,
            config,
        })
    }

    pub fn ask(&self, question: &str) -> LoopReport {
        self.correction_loop.run(question)
    }

    pub fn ask_with(&self, question: &str, ctx: &RequestContext) -> LoopReport {
        self.correction_loop.run_with(question, ctx)
    }

    pub fn config(&self) -> &SchemaLinkConfig {
        &self.config
    }

    pub fn catalog(&self) -> &SchemaCatalog {
        &self.catalog
    }

    pub fn correction_loop(&self) -> &CorrectionLoop {
        &self.correction_loop
    }
}
