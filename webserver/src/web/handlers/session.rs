//! Session inspection and removal

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use shared::{Component, component_info};

use crate::session::SessionSnapshot;
use crate::state::AppState;
use crate::types::{ClearSessionResponse, InactiveSession, STATUS_SUCCESS};
use crate::web::SessionId;

pub async fn clear_session(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Json<ClearSessionResponse> {
    if state.sessions.delete(&session_id).await {
        component_info!(Component::Api, session_id = %session_id, "🧹 Session cleared");
        Json(ClearSessionResponse {
            message: "Session cleared successfully".to_string(),
            status: STATUS_SUCCESS.to_string(),
        })
    } else {
        Json(ClearSessionResponse {
            message: "No active session found".to_string(),
            status: "info".to_string(),
        })
    }
}

/// Metadata of the caller's session, or `{"active": false}`; never mutates
pub async fn session_info(State(state): State<AppState>, SessionId(session_id): SessionId) -> Response {
    match state.sessions.get(&session_id).await {
        Some(session) => Json(SessionSnapshot::new(&session_id, &session)).into_response(),
        None => Json(InactiveSession {
            active: false,
            message: "No active session".to_string(),
        })
        .into_response(),
    }
}
