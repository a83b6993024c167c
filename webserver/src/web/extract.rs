//! Session identifier and query string extraction

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::WebServerError;
use crate::session::DEFAULT_SESSION_ID;
use crate::types::SessionQuery;

pub const SESSION_HEADER: &str = "x-session-id";

/// Caller's session: `?session_id=`, then the `x-session-id` header, then `"default"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn resolve(parts: &Parts) -> String {
        let from_query = Query::<SessionQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(query)| query.session_id);
        let from_header = || {
            parts
                .headers
                .get(SESSION_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };

        from_query
            .or_else(from_header)
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string())
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for SessionId {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(SessionId(Self::resolve(parts)))
    }
}

/// Query string parameters; malformed values are rejected with the JSON error body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = WebServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::try_from_uri(&parts.uri)
            .map(|Query(value)| ApiQuery(value))
            .map_err(|rejection| WebServerError::BadRequest(rejection.body_text()))
    }
}
