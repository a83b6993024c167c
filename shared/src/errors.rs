//! Shared error types for the study assistant service

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Unknown operation kind: {input}")]
    UnknownOperationKind { input: String },

    #[error("Unknown fallback policy: {input}")]
    UnknownFallbackPolicy { input: String },
}
