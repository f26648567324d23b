//! FactCheck LLM Provider Layer
//!
//! Generation Client implementations of the `GenerationProvider` trait from
//! `factcheck-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google Gemini `generateContent` API integration
//!
//! # Examples
//!
//! ```
//! use factcheck_llm::MockProvider;
//! use factcheck_domain::traits::GenerationProvider;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod gemini;

use async_trait::async_trait;
use factcheck_domain::traits::{GenerationProvider, ProviderError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

pub use gemini::{GeminiConfig, GeminiProvider};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// API key not present in the environment
    #[error("Missing credential: environment variable '{0}' is not set")]
    MissingCredential(String),

    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The provider did not answer within the deadline
    #[error("Generation timed out after {0:?}")]
    Timeout(Duration),

    /// Non-success HTTP status, raw body kept for diagnostics
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Response had no candidate or no content part
    #[error("Empty generation result")]
    EmptyResult,

    /// Prompt was empty
    #[error("Prompt cannot be empty")]
    EmptyPrompt,
}

impl ProviderError for LlmError {
    fn is_configuration(&self) -> bool {
        matches!(self, LlmError::MissingCredential(_))
    }
}

/// Canned reply for a prompt
#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error,
    Empty,
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network calls.
///
/// # Examples
///
/// ```
/// use factcheck_llm::MockProvider;
/// use factcheck_domain::traits::GenerationProvider;
///
/// # #[tokio::main]
/// # async fn main() {
/// // Simple fixed response
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(provider.generate("any prompt").await.unwrap(), "Fixed response");
///
/// // Per-prompt responses
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// assert_eq!(provider.generate("prompt1").await.unwrap(), "response1");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_reply: MockReply,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    call_count: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(MockReply::Text(response.into()))
    }

    /// A provider that answers every prompt with [`LlmError::EmptyResult`]
    pub fn empty() -> Self {
        Self::with_default(MockReply::Empty)
    }

    /// A provider that fails every prompt with a communication error
    pub fn failing() -> Self {
        Self::with_default(MockReply::Error)
    }

    fn with_default(default_reply: MockReply) -> Self {
        Self {
            default_reply,
            responses: Arc::new(Mutex::new(HashMap::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(AtomicUsize::new(0)),
            delay: None,
        }
    }

    /// Sleep for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.insert(prompt.into(), MockReply::Text(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.insert(prompt.into(), MockReply::Error);
    }

    fn insert(&mut self, prompt: String, reply: MockReply) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(prompt, reply);
        }
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl GenerationProvider for MockProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self
            .responses
            .lock()
            .ok()
            .and_then(|responses| responses.get(prompt).cloned())
            .unwrap_or_else(|| self.default_reply.clone());

        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Error => Err(LlmError::Communication("Mock error".to_string())),
            MockReply::Empty => Err(LlmError::EmptyResult),
        }
    }
}
