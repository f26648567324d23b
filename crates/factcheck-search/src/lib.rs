//! FactCheck Search Provider Layer
//!
//! Evidence Retriever implementations of the `SearchProvider` trait from
//! `factcheck-domain`.
//!
//! # Providers
//!
//! - `MockSearchProvider`: Deterministic mock for testing
//! - `TavilyProvider`: Tavily web search API integration
//!
//! # Examples
//!
//! ```
//! use factcheck_domain::{traits::SearchProvider, EvidenceItem};
//! use factcheck_search::MockSearchProvider;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let provider = MockSearchProvider::new(vec![
//!     EvidenceItem::new("Title", "https://example.com", "snippet", 0.8),
//! ]);
//! let results = provider.search("query").await.unwrap();
//! assert_eq!(results.len(), 1);
//! # }
//! ```

#![warn(missing_docs)]

pub mod tavily;

use async_trait::async_trait;
use factcheck_domain::traits::{ProviderError, SearchProvider};
use factcheck_domain::EvidenceItem;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub use tavily::{SearchDepth, TavilyConfig, TavilyProvider};

/// Errors that can occur during search operations
#[derive(Error, Debug)]
pub enum SearchError {
    /// API key not present in the environment
    #[error("Missing credential: environment variable '{0}' is not set")]
    MissingCredential(String),

    /// Query was empty
    #[error("Search query cannot be empty")]
    EmptyQuery,

    /// Network or API communication error
    #[error("Communication error: {0}")]
    Transport(String),

    /// The provider did not answer within the deadline
    #[error("Search timed out after {0:?}")]
    Timeout(Duration),

    /// Non-success HTTP status, raw body kept for diagnostics
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Response body did not match the expected shape
    #[error("Failed to decode search response: {0}")]
    Decode(String),
}

impl ProviderError for SearchError {
    fn is_configuration(&self) -> bool {
        matches!(self, SearchError::MissingCredential(_))
    }
}

/// Mock search provider for deterministic testing
///
/// Returns the same evidence list for every query and counts calls.
#[derive(Debug, Clone)]
pub struct MockSearchProvider {
    results: Vec<EvidenceItem>,
    fail: bool,
    delay: Option<Duration>,
    call_count: Arc<AtomicUsize>,
}

impl MockSearchProvider {
    /// Create a mock that returns `results` for every query
    pub fn new(results: Vec<EvidenceItem>) -> Self {
        Self {
            results,
            fail: false,
            delay: None,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A mock whose searches always fail with a transport error
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    /// Sleep for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of searches issued so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    type Error = SearchError;

    async fn search(&self, query: &str) -> Result<Vec<EvidenceItem>, Self::Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        if self.fail {
            return Err(SearchError::Transport("Mock error".to_string()));
        }
        Ok(self.results.clone())
    }
}
