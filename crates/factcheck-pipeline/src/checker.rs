//! Fact-check orchestration
//!
//! Runs one linear pass per request:
//!
//! ```text
//! Retrieving → Composing → Generating → Parsing → AttachingSources → Done
//! ```
//!
//! Any stage failure aborts the run with a single [`PipelineError`]. There are
//! no retries and no partial results.

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Stage};
use crate::parser::parse_model_output;
use crate::prompt::{compose, PromptTemplate};
use async_trait::async_trait;
use factcheck_domain::traits::{GenerationProvider, HistoryStore, ProviderError, SearchProvider};
use factcheck_domain::{EvidenceItem, HistoryEntry, Statement, VerdictResult};
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::time::timeout;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// The single operation offered to the routing layer
#[async_trait]
pub trait FactCheck: Send + Sync {
    /// Check `statement` against live evidence
    async fn fact_check(&self, statement: &str) -> Result<VerdictResult, PipelineError>;
}

/// History collaborator used when none is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHistory;

impl HistoryStore for NoHistory {
    type Error = Infallible;

    fn record(&mut self, _entry: &HistoryEntry) -> Result<i64, Self::Error> {
        Ok(0)
    }

    fn recent(&self, _limit: Option<usize>) -> Result<Vec<HistoryEntry>, Self::Error> {
        Ok(Vec::new())
    }
}

/// Retrieval-augmented fact checker
///
/// Owns its collaborators; nothing is shared between requests except this
/// read-only value and the optional history store.
pub struct FactChecker<S, G, H = NoHistory> {
    search: S,
    generator: G,
    template: PromptTemplate,
    config: PipelineConfig,
    history: Option<Arc<Mutex<H>>>,
}

impl<S, G> FactChecker<S, G, NoHistory>
where
    S: SearchProvider,
    G: GenerationProvider,
{
    /// Create a new FactChecker
    pub fn new(
        search: S,
        generator: G,
        template: PromptTemplate,
        config: PipelineConfig,
    ) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::Configuration)?;

        Ok(Self {
            search,
            generator,
            template,
            config,
            history: None,
        })
    }

    /// Create a FactChecker whose template comes from `config.template_path`,
    /// or the built-in template when unset
    pub fn from_config(search: S, generator: G, config: PipelineConfig) -> Result<Self, PipelineError> {
        let template = match &config.template_path {
            Some(path) => PromptTemplate::load(path)?,
            None => PromptTemplate::builtin(),
        };
        Self::new(search, generator, template, config)
    }
}

impl<S, G, H> FactChecker<S, G, H> {
    /// Persist every successful verdict to `store`
    pub fn with_history<H2>(self, store: Arc<Mutex<H2>>) -> FactChecker<S, G, H2> {
        FactChecker {
            search: self.search,
            generator: self.generator,
            template: self.template,
            config: self.config,
            history: Some(store),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Active instruction template
    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }
}

impl<S, G, H> FactChecker<S, G, H>
where
    S: SearchProvider,
    G: GenerationProvider,
    H: HistoryStore,
{
    /// Fact-check a statement
    ///
    /// Each call gets its own `request_id` in the tracing span.
    pub async fn check(&self, statement: &str) -> Result<VerdictResult, PipelineError> {
        let request_id = Uuid::now_v7();
        self.run(statement)
            .instrument(info_span!("fact_check", %request_id))
            .await
    }

    async fn run(&self, statement: &str) -> Result<VerdictResult, PipelineError> {
        let statement = Statement::new(statement)?;
        info!(statement_len = statement.as_str().len(), "Starting fact-check");

        let evidence = self.retrieve(&statement).await?;

        debug!(stage = %Stage::Composing, "Composing prompt");
        let prompt = compose(&self.template, &evidence, &statement);
        debug!(prompt_len = prompt.len(), "Prompt composed");

        let raw = self.generate(&prompt).await?;

        debug!(stage = %Stage::Parsing, "Parsing model output");
        let parsed = parse_model_output(&raw).inspect_err(|e| {
            warn!(error = %e, "Model output did not match the verdict contract");
        })?;

        debug!(stage = %Stage::AttachingSources, sources = evidence.len(), "Attaching sources");
        let result = parsed.with_sources_from(&evidence);

        self.record_history(&statement, &result);

        info!(
            verdict = %result.verdict,
            confidence = %result.confidence,
            sources = result.sources.len(),
            "Fact-check complete"
        );
        Ok(result)
    }

    async fn retrieve(&self, statement: &Statement) -> Result<Vec<EvidenceItem>, PipelineError> {
        debug!(stage = %Stage::Retrieving, "Retrieving evidence");
        let deadline = self.config.search_timeout();

        let evidence = timeout(deadline, self.search.search(statement.as_str()))
            .await
            .map_err(|_| {
                warn!(?deadline, "Search deadline exceeded");
                PipelineError::Retrieval(format!("search timed out after {:?}", deadline))
            })?
            .map_err(|e| stage_error(e, PipelineError::Retrieval))?;

        if evidence.is_empty() && self.config.require_evidence {
            return Err(PipelineError::Retrieval(
                "search returned no evidence".to_string(),
            ));
        }

        debug!(results = evidence.len(), "Evidence retrieved");
        Ok(evidence)
    }

    async fn generate(&self, prompt: &str) -> Result<String, PipelineError> {
        debug!(stage = %Stage::Generating, "Calling generation provider");
        let deadline = self.config.generation_timeout();

        let raw = timeout(deadline, self.generator.generate(prompt))
            .await
            .map_err(|_| {
                warn!(?deadline, "Generation deadline exceeded");
                PipelineError::Generation(format!("generation timed out after {:?}", deadline))
            })?
            .map_err(|e| stage_error(e, PipelineError::Generation))?;

        debug!(response_len = raw.len(), "Generation complete");
        Ok(raw)
    }

    fn record_history(&self, statement: &Statement, result: &VerdictResult) {
        let Some(store) = &self.history else {
            return;
        };

        let entry = HistoryEntry::new(statement.as_str(), result.clone(), unix_now());
        match store.lock() {
            Ok(mut store) => match store.record(&entry) {
                Ok(id) => info!(id, "Saved fact-check record"),
                Err(e) => warn!(error = %e, "Failed to save fact-check record"),
            },
            Err(e) => warn!(error = %e, "History store unavailable"),
        }
    }
}

#[async_trait]
impl<S, G, H> FactCheck for FactChecker<S, G, H>
where
    S: SearchProvider,
    G: GenerationProvider,
    H: HistoryStore + Send + 'static,
{
    async fn fact_check(&self, statement: &str) -> Result<VerdictResult, PipelineError> {
        self.check(statement).await
    }
}

/// Map a provider failure to its stage error, lifting credential problems to
/// `Configuration`
fn stage_error<E: ProviderError>(e: E, wrap: fn(String) -> PipelineError) -> PipelineError {
    if e.is_configuration() {
        PipelineError::Configuration(e.to_string())
    } else {
        wrap(e.to_string())
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
