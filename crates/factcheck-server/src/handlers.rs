//! HTTP request handlers for the fact-check service.
//!
//! Validates requests, hands statements to the pipeline under the request
//! deadline and maps pipeline failures onto status codes.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use factcheck_domain::traits::HistoryStore;
use factcheck_domain::{HistoryEntry, VerdictResult};
use factcheck_pipeline::{FactCheck, PipelineError};
use factcheck_store::SqliteHistoryStore;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{error, info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The fact-check pipeline
    pub checker: Arc<dyn FactCheck>,
    /// History store, shared with the pipeline which writes to it
    pub history: Arc<Mutex<SqliteHistoryStore>>,
    /// Deadline for one fact-check request
    pub request_timeout: Duration,
}

/// Fact-check request body
#[derive(Debug, Deserialize)]
pub struct FactCheckRequest {
    /// The claim to check
    pub statement: String,
}

/// History query parameters
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Maximum number of entries, newest first
    pub limit: Option<usize>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "UP" while the process serves requests
    pub status: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Malformed or empty request
    BadRequest(String),
    /// The pipeline failed
    Pipeline(PipelineError),
    /// The request deadline elapsed
    Timeout(Duration),
    /// Internal server error
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Pipeline(e) => match e {
                PipelineError::InvalidStatement(_) => StatusCode::BAD_REQUEST,
                PipelineError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
                PipelineError::Retrieval(_)
                | PipelineError::Generation(_)
                | PipelineError::Parse { .. } => StatusCode::BAD_GATEWAY,
            },
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest(msg) | AppError::Internal(msg) => msg,
            AppError::Pipeline(e) => e.to_string(),
            AppError::Timeout(limit) => format!("Fact-check did not finish within {:?}", limit),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        AppError::Pipeline(e)
    }
}

/// POST /v1/fact-check - Check one statement
async fn fact_check(
    State(state): State<AppState>,
    payload: Result<Json<FactCheckRequest>, JsonRejection>,
) -> Result<Json<VerdictResult>, AppError> {
    let Json(request) = payload.map_err(|e| {
        warn!(error = %e, "Invalid JSON in request body");
        AppError::BadRequest("Invalid request body format".to_string())
    })?;

    if request.statement.trim().is_empty() {
        warn!("Request received with empty statement field");
        return Err(AppError::BadRequest("Statement cannot be empty".to_string()));
    }

    info!(
        statement_length = request.statement.len(),
        "Received fact-check request"
    );

    match tokio::time::timeout(state.request_timeout, state.checker.fact_check(&request.statement)).await {
        Ok(Ok(result)) => Ok(Json(result)),
        Ok(Err(e)) => {
            error!(error = %e, stage = %e.stage(), "Fact-check failed");
            Err(e.into())
        }
        Err(_) => {
            warn!(timeout = ?state.request_timeout, "Fact-check request deadline exceeded");
            Err(AppError::Timeout(state.request_timeout))
        }
    }
}

/// GET /v1/history - Past fact-checks, newest first
async fn history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    info!(limit = ?query.limit, "Received request for fact-check history");

    let store = state
        .history
        .lock()
        .map_err(|e| AppError::Internal(format!("History store unavailable: {}", e)))?;

    let entries = store.recent(query.limit).map_err(|e| {
        error!(error = %e, "Failed to retrieve fact-check history");
        AppError::Internal("Failed to retrieve history".to_string())
    })?;

    Ok(Json(entries))
}

/// GET /health - Liveness check
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP".to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/fact-check", post(fact_check))
        .route("/v1/history", get(history))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use factcheck_domain::StatementError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (
                AppError::Pipeline(PipelineError::InvalidStatement(StatementError::Empty)),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Pipeline(PipelineError::Configuration("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Pipeline(PipelineError::Retrieval("x".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AppError::Pipeline(PipelineError::Generation("x".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AppError::Pipeline(PipelineError::Parse {
                    message: "x".into(),
                    raw: "y".into(),
                }),
                StatusCode::BAD_GATEWAY,
            ),
            (AppError::Timeout(Duration::from_secs(30)), StatusCode::GATEWAY_TIMEOUT),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status(), expected, "{:?}", err);
        }
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = AppError::BadRequest("Statement cannot be empty".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.error, "Statement cannot be empty");
    }
}
