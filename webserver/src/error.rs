//! WebServer-specific error types and their HTTP mapping

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use orchestrator::OperationError;
use serde::Serialize;
use shared::{Component, component_error, component_warn};
use thiserror::Error;

pub const NO_SESSION_DETAIL: &str = "No document found. Please upload a PDF first.";

/// Error response body: `{"detail": ..., "code": ...}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
    pub code: &'static str,
}

#[derive(Error, Debug)]
pub enum WebServerError {
    /// Caller-correctable input problem
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Timeout(String),

    /// Document accepted but no usable text could be extracted
    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("{0}")]
    Internal(String),

    #[error("Server startup error: {0}")]
    ServerStartup(String),
}

impl WebServerError {
    pub fn no_session() -> Self {
        WebServerError::NotFound(NO_SESSION_DETAIL.to_string())
    }

    /// Map a bounded-operation failure, `context` naming the operation ("Summary generation")
    pub fn from_operation(err: OperationError, context: &str) -> Self {
        match err {
            OperationError::TimedOut { .. } => WebServerError::Timeout(format!("{context} timeout. Please try again.")),
            OperationError::Failed { message, .. } => WebServerError::Internal(format!("{context} failed: {message}")),
            OperationError::InvalidFallback { message, .. } => {
                WebServerError::Internal(format!("{context} failed: {message}"))
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            WebServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            WebServerError::NotFound(_) => StatusCode::NOT_FOUND,
            WebServerError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            WebServerError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            WebServerError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            WebServerError::Internal(_) | WebServerError::ServerStartup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            WebServerError::BadRequest(_) => "BAD_REQUEST",
            WebServerError::NotFound(_) => "NOT_FOUND",
            WebServerError::Timeout(_) => "TIMEOUT",
            WebServerError::Unprocessable(_) => "UNPROCESSABLE_CONTENT",
            WebServerError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            WebServerError::Internal(_) | WebServerError::ServerStartup(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();

        if status.is_server_error() {
            component_error!(Component::Api, status = status.as_u16(), detail = %detail, "❌ Request failed");
        } else {
            component_warn!(Component::Api, status = status.as_u16(), detail = %detail, "⚠️ Request rejected");
        }

        let body = ErrorBody { detail, code: self.code() };
        (status, Json(body)).into_response()
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::OperationKind;
    use std::time::Duration;

    #[test]
    fn test_operation_errors_map_to_timeout_and_internal() {
        let timeout = WebServerError::from_operation(
            OperationError::TimedOut { kind: OperationKind::QuestionAnswer, after: Duration::from_secs(60) },
            "Question answering",
        );
        assert_eq!(timeout.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(timeout.to_string(), "Question answering timeout. Please try again.");

        let failed = WebServerError::from_operation(
            OperationError::Failed { kind: OperationKind::Summary, message: "rate limit exceeded".into() },
            "Summary generation",
        );
        assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(failed.to_string(), "Summary generation failed: rate limit exceeded");
    }

    #[test]
    fn test_classifications() {
        assert_eq!(WebServerError::no_session().status(), StatusCode::NOT_FOUND);
        assert_eq!(WebServerError::Unprocessable("x".into()).code(), "UNPROCESSABLE_CONTENT");
        assert_eq!(WebServerError::ServiceUnavailable("x".into()).status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
