//! Capability interfaces for external collaborators
//!
//! Each outbound dependency of the pipeline is a single-method trait so that
//! tests can substitute deterministic fakes. Implementations live in
//! `factcheck-search`, `factcheck-llm` and `factcheck-store`.

use crate::evidence::EvidenceItem;
use crate::history::HistoryEntry;
use async_trait::async_trait;

/// Common behaviour of provider error types
///
/// Lets the orchestrator tell configuration problems (e.g. a missing API key)
/// apart from runtime failures without knowing the concrete provider.
pub trait ProviderError: std::error::Error + Send + Sync + 'static {
    /// Whether this failure stems from missing or invalid configuration
    fn is_configuration(&self) -> bool {
        false
    }
}

/// Web search capability
///
/// Implemented by the infrastructure layer (factcheck-search)
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Error type for search operations
    type Error: ProviderError;

    /// Return ranked evidence for `query`, most relevant first
    async fn search(&self, query: &str) -> Result<Vec<EvidenceItem>, Self::Error>;
}

/// Text generation capability
///
/// Implemented by the infrastructure layer (factcheck-llm)
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Error type for generation operations
    type Error: ProviderError;

    /// Generate raw model text for `prompt`
    async fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}

/// Storage for past fact-checks
///
/// Implemented by the infrastructure layer (factcheck-store)
pub trait HistoryStore {
    /// Error type for store operations
    type Error: std::error::Error;

    /// Persist an entry, returning its assigned id
    fn record(&mut self, entry: &HistoryEntry) -> Result<i64, Self::Error>;

    /// Most recent entries first, optionally limited
    fn recent(&self, limit: Option<usize>) -> Result<Vec<HistoryEntry>, Self::Error>;
}
