//! FactCheck Server
//!
//! HTTP front end for the fact-check pipeline. Wires the Tavily and Gemini
//! providers, the SQLite history store and the axum routes together.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::{LogFormat, ServerConfig};
use factcheck_llm::{GeminiProvider, LlmError};
use factcheck_pipeline::{FactChecker, PipelineError};
use factcheck_search::{SearchError, TavilyProvider};
use factcheck_store::{SqliteHistoryStore, StoreError};
use handlers::{create_router, AppState};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Search provider could not be set up
    #[error("Search provider: {0}")]
    Search(#[from] SearchError),

    /// Generation provider could not be set up
    #[error("Generation provider: {0}")]
    Generation(#[from] LlmError),

    /// Pipeline could not be set up
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// History store could not be opened
    #[error("History store: {0}")]
    Store(#[from] StoreError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber
///
/// Filtering follows `RUST_LOG`, defaulting to `info`. Does nothing if a
/// subscriber is already installed.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
}

/// Build the application state from configuration
///
/// Reads provider credentials from the environment and opens the history
/// database.
pub fn build_state(config: &ServerConfig) -> Result<AppState, ServerError> {
    let search = TavilyProvider::from_env(&config.search)?;
    let generator = GeminiProvider::from_env(&config.generation)?;
    let history = Arc::new(Mutex::new(SqliteHistoryStore::new(&config.database_path)?));

    let checker = FactChecker::from_config(search, generator, config.pipeline.clone())?
        .with_history(Arc::clone(&history));

    Ok(AppState {
        checker: Arc::new(checker),
        history,
        request_timeout: config.request_timeout(),
    })
}

/// Start the HTTP server
///
/// Initializes logging, builds the pipeline and serves until the process
/// is stopped.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    init_tracing(config.log_format);

    info!("Starting FactCheck server");
    info!("Bind address: {}", config.bind_addr());
    info!("History database: {}", config.database_path.display());
    info!(
        search_timeout = ?config.pipeline.search_timeout(),
        generation_timeout = ?config.pipeline.generation_timeout(),
        request_timeout = ?config.request_timeout(),
        "Deadlines"
    );

    let state = build_state(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
