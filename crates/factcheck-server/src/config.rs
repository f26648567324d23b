//! Configuration file parsing for the server.
//!
//! Loads bind settings, the history database location, the request deadline
//! and the pipeline/provider sections from TOML. Credentials are never read
//! from this file; only the names of the environment variables holding them.

use factcheck_llm::GeminiConfig;
use factcheck_pipeline::PipelineConfig;
use factcheck_search::TavilyConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (default: 8080)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// SQLite file for fact-check history
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Overall deadline for one fact-check request in seconds (default: 30)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,

    /// Pipeline settings
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Search provider settings
    #[serde(default)]
    pub search: TavilyConfig,

    /// Generation provider settings
    #[serde(default)]
    pub generation: GeminiConfig,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8080
}

fn default_database_path() -> PathBuf {
    PathBuf::from("factcheck.db")
}

fn default_request_timeout() -> u64 {
    30
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges across all sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.generation.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "generation.timeout_secs must be greater than 0".to_string(),
            ));
        }
        self.pipeline.validate().map_err(ConfigError::Invalid)?;
        self.search.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }

    /// Create a default configuration for local use
    pub fn default_config() -> Self {
        ServerConfig {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            database_path: default_database_path(),
            request_timeout_secs: default_request_timeout(),
            log_format: LogFormat::default(),
            pipeline: PipelineConfig::default(),
            search: TavilyConfig::default(),
            generation: GeminiConfig::default(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }

    /// Get the request deadline as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
