//! Agent error types

use thiserror::Error;

/// Result type for collaborator calls
pub type AgentResult<T> = Result<T, AgentError>;

/// Failure reasons for requests to a remote API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limit exceeded")]
    RateLimitExceeded,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("server error: {0}")]
    ServerError(String),

    #[error("service temporarily unavailable")]
    ServiceUnavailable,

    #[error("response contained no content")]
    EmptyResponse,
}

impl ApiFailure {
    /// Map a non-success HTTP status to a failure reason
    pub fn from_status(status: reqwest::StatusCode, model: &str) -> Self {
        match status.as_u16() {
            400 => ApiFailure::InvalidRequest(status.to_string()),
            401 | 403 => ApiFailure::AuthenticationFailed,
            404 => ApiFailure::ModelUnavailable(model.to_string()),
            429 => ApiFailure::RateLimitExceeded,
            503 => ApiFailure::ServiceUnavailable,
            _ => ApiFailure::ServerError(status.to_string()),
        }
    }
}

/// Collaborator error types
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("{service} request failed: {reason}")]
    Api { service: &'static str, reason: ApiFailure },

    #[error("{service} is not configured: {message}")]
    NotConfigured { service: &'static str, message: String },

    #[error("Malformed reply: {message}")]
    MalformedReply { message: String },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AgentError {
    pub fn api(service: &'static str, reason: ApiFailure) -> Self {
        AgentError::Api { service, reason }
    }
}
