//! Bounded orchestrator
//!
//! Runs one unit of work per call on a worker, waits up to the kind's
//! deadline, and settles the result through the policy table:
//!
//! | Policy           | Timeout                 | Collaborator error       |
//! |------------------|-------------------------|--------------------------|
//! | `Fail`           | `OperationError::TimedOut` | `OperationError::Failed` |
//! | `EmptyList`      | degraded `[]`           | degraded `[]`            |
//! | `StaticPayload`  | degraded payload        | `OperationError::Failed` |
//!
//! On timeout the worker is cancelled: async tasks are aborted at their next
//! await point, blocking workers see their [`CancellationToken`] fire and are
//! expected to stop at their next checkpoint.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use shared::{
    Component, ExtractionReport, FallbackPolicy, OperationKind, component_debug, component_error,
    component_info, component_warn,
};
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::error::{OperationError, OrchestratorResult};
use crate::policy::{OperationPolicy, PolicyTable};
use crate::stats::{OperationStats, Settlement};

/// Results that can be produced by a bounded operation or its fallback
pub trait Payload: DeserializeOwned + Send + 'static {
    /// Empty results are replaced by the placeholder under `StaticPayload`
    fn is_empty_result(&self) -> bool {
        false
    }
}

impl Payload for String {
    fn is_empty_result(&self) -> bool {
        self.trim().is_empty()
    }
}

impl<T: DeserializeOwned + Send + 'static> Payload for Vec<T> {
    fn is_empty_result(&self) -> bool {
        self.is_empty()
    }
}

impl Payload for ExtractionReport {}

/// Why a result was substituted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradeCause {
    TimedOut,
    CollaboratorUnavailable(String),
    EmptyResult,
}

impl fmt::Display for DegradeCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradeCause::TimedOut => write!(f, "timeout"),
            DegradeCause::CollaboratorUnavailable(_) => write!(f, "collaborator_unavailable"),
            DegradeCause::EmptyResult => write!(f, "empty_result"),
        }
    }
}

/// Successful settlement of a bounded operation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Completed(T),
    Degraded { value: T, cause: DegradeCause },
}

impl<T> Outcome<T> {
    pub fn into_inner(self) -> T {
        match self {
            Outcome::Completed(value) | Outcome::Degraded { value, .. } => value,
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Outcome::Completed(value) | Outcome::Degraded { value, .. } => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Outcome::Degraded { .. })
    }

    pub fn cause(&self) -> Option<&DegradeCause> {
        match self {
            Outcome::Completed(_) => None,
            Outcome::Degraded { cause, .. } => Some(cause),
        }
    }
}

/// What the worker handed back, before policy is applied
enum Raw<T> {
    Value(T),
    Error(String),
    Elapsed(Duration),
}

/// Dispatches operations to workers and enforces per-kind deadlines
#[derive(Debug, Clone)]
pub struct BoundedOrchestrator {
    policies: Arc<PolicyTable>,
    stats: OperationStats,
    root: CancellationToken,
}

impl BoundedOrchestrator {
    pub fn new(policies: PolicyTable) -> Self {
        Self {
            policies: Arc::new(policies),
            stats: OperationStats::new(),
            root: CancellationToken::new(),
        }
    }

    pub fn policies(&self) -> &PolicyTable {
        &self.policies
    }

    pub fn stats(&self) -> &OperationStats {
        &self.stats
    }

    /// Cancel every in-flight worker, used on shutdown
    pub fn cancel_all(&self) {
        self.root.cancel();
    }

    /// Run an async operation on a spawned task under the kind's deadline
    pub async fn execute<T, E, Fut>(&self, kind: OperationKind, operation: Fut) -> OrchestratorResult<Outcome<T>>
    where
        T: Payload,
        E: fmt::Display + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let token = self.root.child_token();
        let worker_token = token.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                result = operation => result.map_err(|e| e.to_string()),
                _ = worker_token.cancelled() => Err("cancelled at shutdown".to_string()),
            }
        });
        self.supervise(kind, handle, token).await
    }

    /// Run a blocking closure on the blocking pool under the kind's deadline.
    ///
    /// The closure receives a token that fires when the deadline passes or the
    /// orchestrator shuts down; it should check it between expensive steps.
    pub async fn execute_blocking<T, E, F>(&self, kind: OperationKind, operation: F) -> OrchestratorResult<Outcome<T>>
    where
        T: Payload,
        E: fmt::Display + Send + 'static,
        F: FnOnce(CancellationToken) -> Result<T, E> + Send + 'static,
    {
        let token = self.root.child_token();
        let worker_token = token.clone();
        let handle = tokio::task::spawn_blocking(move || operation(worker_token).map_err(|e| e.to_string()));
        self.supervise(kind, handle, token).await
    }

    async fn supervise<T: Payload>(
        &self,
        kind: OperationKind,
        mut handle: JoinHandle<Result<T, String>>,
        token: CancellationToken,
    ) -> OrchestratorResult<Outcome<T>> {
        let policy = self.policies.policy(kind);
        let deadline = policy.timeout();
        let started = Instant::now();

        component_debug!(Component::Orchestrator, kind = %kind, timeout_ms = policy.timeout_ms, "Dispatching {}", kind);

        let raw = match tokio::time::timeout(deadline, &mut handle).await {
            Ok(Ok(Ok(value))) => Raw::Value(value),
            Ok(Ok(Err(message))) => Raw::Error(message),
            Ok(Err(join_error)) => Raw::Error(describe_join_error(join_error)),
            Err(_) => {
                token.cancel();
                handle.abort();
                Raw::Elapsed(deadline)
            }
        };

        self.settle(kind, policy, raw, started.elapsed()).await
    }

    async fn settle<T: Payload>(
        &self,
        kind: OperationKind,
        policy: &OperationPolicy,
        raw: Raw<T>,
        elapsed: Duration,
    ) -> OrchestratorResult<Outcome<T>> {
        let elapsed_ms = elapsed.as_millis() as u64;

        match raw {
            Raw::Value(value) => {
                let empty = value.is_empty_result();
                if empty && policy.fallback == FallbackPolicy::StaticPayload {
                    self.stats.record(kind, Settlement::DegradedEmpty, elapsed).await;
                    component_warn!(
                        Component::Orchestrator,
                        kind = %kind,
                        cause = "empty_result",
                        elapsed_ms,
                        "⚠️ {} returned nothing, serving placeholder",
                        kind
                    );
                    return self.degrade(kind, policy, DegradeCause::EmptyResult);
                }
                self.stats.record(kind, Settlement::Completed { empty }, elapsed).await;
                component_info!(Component::Orchestrator, kind = %kind, elapsed_ms, empty, "✅ {} completed", kind);
                Ok(Outcome::Completed(value))
            }
            Raw::Error(message) if policy.fallback.masks_errors() => {
                self.stats.record(kind, Settlement::DegradedError, elapsed).await;
                component_warn!(
                    Component::Orchestrator,
                    kind = %kind,
                    cause = "collaborator_unavailable",
                    elapsed_ms,
                    error = %message,
                    "⚠️ {} collaborator failed, degrading to {}",
                    kind,
                    policy.fallback
                );
                self.degrade(kind, policy, DegradeCause::CollaboratorUnavailable(message))
            }
            Raw::Error(message) => {
                self.stats.record(kind, Settlement::FailedError, elapsed).await;
                component_error!(Component::Orchestrator, kind = %kind, elapsed_ms, error = %message, "❌ {} failed", kind);
                Err(OperationError::Failed { kind, message })
            }
            Raw::Elapsed(_) if policy.fallback.masks_timeouts() => {
                self.stats.record(kind, Settlement::DegradedTimeout, elapsed).await;
                component_warn!(
                    Component::Orchestrator,
                    kind = %kind,
                    cause = "timeout",
                    elapsed_ms,
                    "⏱️ {} timed out, degrading to {}",
                    kind,
                    policy.fallback
                );
                self.degrade(kind, policy, DegradeCause::TimedOut)
            }
            Raw::Elapsed(after) => {
                self.stats.record(kind, Settlement::FailedTimeout, elapsed).await;
                component_error!(Component::Orchestrator, kind = %kind, elapsed_ms, "❌ {} timed out", kind);
                Err(OperationError::TimedOut { kind, after })
            }
        }
    }

    fn degrade<T: Payload>(
        &self,
        kind: OperationKind,
        policy: &OperationPolicy,
        cause: DegradeCause,
    ) -> OrchestratorResult<Outcome<T>> {
        let payload = policy.fallback_payload().ok_or_else(|| OperationError::InvalidFallback {
            kind,
            message: "no payload configured".to_string(),
        })?;
        let value = serde_json::from_value(payload).map_err(|e| OperationError::InvalidFallback {
            kind,
            message: e.to_string(),
        })?;
        Ok(Outcome::Degraded { value, cause })
    }
}

fn describe_join_error(join_error: JoinError) -> String {
    if join_error.is_panic() {
        let panic = join_error.into_panic();
        let detail = panic
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        format!("worker panicked: {detail}")
    } else {
        "worker cancelled".to_string()
    }
}
