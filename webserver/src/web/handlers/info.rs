//! Service metadata and readiness

use axum::Json;
use axum::extract::State;

use crate::error::{WebServerError, WebServerResult};
use crate::state::AppState;
use crate::types::{HealthResponse, RootResponse};

pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "AI Study Assistant API".to_string(),
        version: state.config.version.to_string(),
        status: "running".to_string(),
    })
}

/// Readiness flags plus per-kind outcome counters; 503 once the server stops being ready
pub async fn health(State(state): State<AppState>) -> WebServerResult<Json<HealthResponse>> {
    if !state.is_ready() {
        return Err(WebServerError::ServiceUnavailable("Agents not properly initialized".to_string()));
    }

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        agents_initialized: true,
        openai_key_configured: state.config.openai_key_configured,
        active_sessions: state.sessions.len().await,
        uptime_seconds: state.uptime_seconds(),
        operations: state.orchestrator.stats().snapshot().await,
    }))
}
