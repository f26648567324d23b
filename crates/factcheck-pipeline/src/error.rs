//! Error types for the fact-check pipeline

use std::fmt;
use thiserror::Error;

/// Pipeline stage, used to report where a run failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Loading templates, credentials and settings
    Configuration,
    /// Validating the input statement
    Validating,
    /// Querying the search provider
    Retrieving,
    /// Building the prompt
    Composing,
    /// Calling the generation provider
    Generating,
    /// Decoding the model reply
    Parsing,
    /// Rebuilding citations from evidence
    AttachingSources,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Configuration => "configuration",
            Stage::Validating => "validating",
            Stage::Retrieving => "retrieving",
            Stage::Composing => "composing",
            Stage::Generating => "generating",
            Stage::Parsing => "parsing",
            Stage::AttachingSources => "attaching_sources",
        };
        f.write_str(name)
    }
}

/// Errors that can occur during a fact-check
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Missing credentials, template or invalid settings
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The statement failed validation
    #[error("Invalid statement: {0}")]
    InvalidStatement(#[from] factcheck_domain::StatementError),

    /// Evidence gathering failed
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// The generation provider failed or returned nothing usable
    #[error("Generation error: {0}")]
    Generation(String),

    /// The model answered, but not in the required structure
    #[error("Parse error: {message} (content: {raw})")]
    Parse {
        /// Decoder diagnostic
        message: String,
        /// Model output after fence stripping and trimming
        raw: String,
    },
}

impl PipelineError {
    /// Stage at which this error was raised
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Configuration(_) => Stage::Configuration,
            PipelineError::InvalidStatement(_) => Stage::Validating,
            PipelineError::Retrieval(_) => Stage::Retrieving,
            PipelineError::Generation(_) => Stage::Generating,
            PipelineError::Parse { .. } => Stage::Parsing,
        }
    }

    /// Cleaned model output for parse failures
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            PipelineError::Parse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}
