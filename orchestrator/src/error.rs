//! Orchestrator-specific error types

use std::time::Duration;
use thiserror::Error;
use shared::OperationKind;

/// Failure of a bounded operation whose policy does not mask it
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OperationError {
    #[error("{kind} timed out after {}s", after.as_secs_f64())]
    TimedOut { kind: OperationKind, after: Duration },

    #[error("{kind} failed: {message}")]
    Failed { kind: OperationKind, message: String },

    #[error("fallback payload for {kind} is unusable: {message}")]
    InvalidFallback { kind: OperationKind, message: String },
}

impl OperationError {
    pub fn kind(&self) -> OperationKind {
        match self {
            OperationError::TimedOut { kind, .. }
            | OperationError::Failed { kind, .. }
            | OperationError::InvalidFallback { kind, .. } => *kind,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, OperationError::TimedOut { .. })
    }
}

/// Problems loading or validating a policy table
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("policy for {kind}: {reason}")]
    InvalidEntry { kind: OperationKind, reason: String },

    #[error("policy table is missing an entry for {kind}")]
    MissingEntry { kind: OperationKind },

    #[error("invalid policy table: {reason}")]
    InvalidTable { reason: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type OrchestratorResult<T> = Result<T, OperationError>;
