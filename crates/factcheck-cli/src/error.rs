//! Error types for the CLI application.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be loaded
    #[error(transparent)]
    ConfigFile(#[from] factcheck_server::config::ConfigError),

    /// Server setup or runtime error
    #[error(transparent)]
    Server(#[from] factcheck_server::ServerError),

    /// Fact-check failed
    #[error("Fact-check failed: {0}")]
    Pipeline(#[from] factcheck_pipeline::PipelineError),

    /// History store error
    #[error("History error: {0}")]
    Store(#[from] factcheck_store::StoreError),

    /// The fact-check did not finish in time
    #[error("Fact-check did not finish within {0:?}")]
    Timeout(Duration),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
