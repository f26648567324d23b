//! Tavily Provider Implementation
//!
//! Queries the Tavily search API for a bounded number of ranked snippets.
//!
//! # Examples
//!
//! ```no_run
//! use factcheck_search::{TavilyConfig, TavilyProvider};
//!
//! // Reads TAVILY_API_KEY from the environment
//! let provider = TavilyProvider::from_env(&TavilyConfig::default()).unwrap();
//! ```

use crate::SearchError;
use async_trait::async_trait;
use factcheck_domain::traits::SearchProvider;
use factcheck_domain::EvidenceItem;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Tavily search endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.tavily.com/search";

/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "TAVILY_API_KEY";

/// Default number of results requested
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// Default timeout for search requests (10 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Tavily search depth mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    /// Fast, cheaper search
    #[default]
    Basic,
    /// Slower, more thorough search
    Advanced,
}

/// Tavily provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TavilyConfig {
    /// Search endpoint URL
    pub endpoint: String,

    /// Name of the environment variable holding the API key
    pub api_key_env: String,

    /// Search depth mode sent with every query
    pub search_depth: SearchDepth,

    /// Maximum number of results kept (top-K)
    pub max_results: usize,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for TavilyConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            search_depth: SearchDepth::Basic,
            max_results: DEFAULT_MAX_RESULTS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl TavilyConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_results == 0 || self.max_results > 20 {
            return Err("max_results must be between 1 and 20".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Tavily web search provider
pub struct TavilyProvider {
    endpoint: String,
    api_key: String,
    search_depth: SearchDepth,
    max_results: usize,
    client: reqwest::Client,
    timeout: Duration,
}

/// Request body for the Tavily search API
#[derive(Debug, Serialize)]
struct TavilySearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: SearchDepth,
    max_results: usize,
}

/// Response from the Tavily search API
#[derive(Debug, Deserialize)]
struct TavilySearchResponse {
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    title: String,
    url: String,
    content: String,
    score: f64,
}

impl From<TavilyResult> for EvidenceItem {
    fn from(r: TavilyResult) -> Self {
        EvidenceItem::new(r.title, r.url, r.content, r.score)
    }
}

impl TavilyProvider {
    /// Create a provider, reading the API key from `config.api_key_env`
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MissingCredential`] if the variable is unset or empty.
    pub fn from_env(config: &TavilyConfig) -> Result<Self, SearchError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| SearchError::MissingCredential(config.api_key_env.clone()))?;
        Self::new(config, api_key)
    }

    /// Create a provider with an explicitly provided API key
    pub fn new(config: &TavilyConfig, api_key: impl Into<String>) -> Result<Self, SearchError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SearchError::MissingCredential(config.api_key_env.clone()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SearchError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            api_key,
            search_depth: config.search_depth,
            max_results: config.max_results,
            client,
            timeout: config.timeout(),
        })
    }

    /// Number of results this provider keeps
    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Search the web for evidence about `query`
    ///
    /// Results keep Tavily's relevance order and are truncated to `max_results`.
    /// The whole response is decoded at once, so a malformed item fails the call
    /// rather than being silently dropped.
    pub async fn search(&self, query: &str) -> Result<Vec<EvidenceItem>, SearchError> {
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let request = TavilySearchRequest {
            api_key: &self.api_key,
            query,
            search_depth: self.search_depth,
            max_results: self.max_results,
        };

        debug!(depth = ?self.search_depth, max_results = self.max_results, "Sending search request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TavilySearchResponse =
            serde_json::from_str(&body).map_err(|e| SearchError::Decode(e.to_string()))?;

        let evidence: Vec<EvidenceItem> = parsed
            .results
            .into_iter()
            .take(self.max_results)
            .map(EvidenceItem::from)
            .collect();

        debug!(results = evidence.len(), "Received search results");
        Ok(evidence)
    }

    fn transport_error(&self, e: reqwest::Error) -> SearchError {
        if e.is_timeout() {
            SearchError::Timeout(self.timeout)
        } else {
            SearchError::Transport(format!("Request failed: {}", e))
        }
    }
}

#[async_trait]
impl SearchProvider for TavilyProvider {
    type Error = SearchError;

    async fn search(&self, query: &str) -> Result<Vec<EvidenceItem>, Self::Error> {
        TavilyProvider::search(self, query).await
    }
}
