//! Bounded orchestration for study-artifact operations
//!
//! Every collaborator call made on behalf of a request runs through the
//! [`BoundedOrchestrator`]: it is moved onto a worker, raced against the
//! deadline of its [`OperationKind`](shared::OperationKind), and settled
//! according to the kind's entry in the [`PolicyTable`]. Fallback content,
//! character budgets and count ranges all live in that table so handlers
//! never hard-code degradation rules.

pub mod bounded;
pub mod error;
pub mod fallbacks;
pub mod input;
pub mod policy;
pub mod stats;

pub use bounded::{BoundedOrchestrator, DegradeCause, Outcome, Payload};
pub use error::{OperationError, OrchestratorResult, PolicyError};
pub use input::{clamp_count, truncate_chars};
pub use policy::{CountBounds, OperationPolicy, PolicyTable};
pub use stats::{KindStats, OperationStats};
