//! HTTP Handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crypto_analysis::AnalysisError;

use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub agents: usize,
    pub tasks: usize,
}

/// The three form fields
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub cryptocurrency: String,
    #[serde(default)]
    pub openai_api_key: String,
    #[serde(default)]
    pub serp_api_key: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub result: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>, code: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

impl From<AnalysisError> for ErrorResponse {
    fn from(err: AnalysisError) -> Self {
        Self {
            code: err.code().into(),
            error: err.to_string(),
        }
    }
}

fn status_for(err: &AnalysisError) -> StatusCode {
    if err.is_config() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::BAD_GATEWAY
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let roster = state.crew.roster();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        agents: roster.agents().len(),
        tasks: roster.tasks().len(),
    })
}

/// Run the full analysis and return the final report
pub async fn analyze_handler(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let openai_key = state.config.resolve_openai_key(&payload.openai_api_key);
    let serp_key = state.config.resolve_serp_key(&payload.serp_api_key);

    let run = state
        .crew
        .analyze(&payload.cryptocurrency, &openai_key, &serp_key);

    let outcome = match state.config.analysis_timeout {
        Some(limit) => tokio::time::timeout(limit, run).await.map_err(|_| {
            tracing::error!(timeout_secs = limit.as_secs(), "Analysis timed out");
            api_error(
                StatusCode::GATEWAY_TIMEOUT,
                format!("Analysis did not finish within {} seconds", limit.as_secs()),
                "ANALYSIS_TIMEOUT",
            )
        })?,
        None => run.await,
    };

    let result = outcome.map_err(|e| {
        let status = status_for(&e);
        if status.is_client_error() {
            tracing::info!(error = %e, "Rejected analysis request");
        } else {
            tracing::error!(error = %e, "Analysis error");
        }
        (status, Json(ErrorResponse::from(e)))
    })?;

    Ok(Json(AnalyzeResponse { result }))
}
