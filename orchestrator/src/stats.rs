//! Per-kind outcome counters
//!
//! Degraded responses look like successes to callers, so these counters are
//! where "found nothing" stays distinguishable from "service unavailable".

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared::OperationKind;
use tokio::sync::RwLock;

/// Outcome counters for one operation kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindStats {
    pub completed: u64,
    /// Completed with an empty collection or blank text
    pub completed_empty: u64,
    pub degraded_timeout: u64,
    pub degraded_error: u64,
    pub degraded_empty: u64,
    pub failed_timeout: u64,
    pub failed_error: u64,
    pub total_elapsed_ms: u64,
}

impl KindStats {
    pub fn total(&self) -> u64 {
        self.completed
            + self.degraded_timeout
            + self.degraded_error
            + self.degraded_empty
            + self.failed_timeout
            + self.failed_error
    }

    pub fn degraded(&self) -> u64 {
        self.degraded_timeout + self.degraded_error + self.degraded_empty
    }
}

/// Recorded settlement of one bounded operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Settlement {
    Completed { empty: bool },
    DegradedTimeout,
    DegradedError,
    DegradedEmpty,
    FailedTimeout,
    FailedError,
}

/// Shared counters, cheap to clone
#[derive(Debug, Clone, Default)]
pub struct OperationStats {
    inner: Arc<RwLock<BTreeMap<OperationKind, KindStats>>>,
}

impl OperationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn record(&self, kind: OperationKind, settlement: Settlement, elapsed: Duration) {
        let mut stats = self.inner.write().await;
        let entry = stats.entry(kind).or_default();
        entry.total_elapsed_ms += elapsed.as_millis() as u64;
        match settlement {
            Settlement::Completed { empty } => {
                entry.completed += 1;
                if empty {
                    entry.completed_empty += 1;
                }
            }
            Settlement::DegradedTimeout => entry.degraded_timeout += 1,
            Settlement::DegradedError => entry.degraded_error += 1,
            Settlement::DegradedEmpty => entry.degraded_empty += 1,
            Settlement::FailedTimeout => entry.failed_timeout += 1,
            Settlement::FailedError => entry.failed_error += 1,
        }
    }

    pub async fn get(&self, kind: OperationKind) -> KindStats {
        self.inner.read().await.get(&kind).cloned().unwrap_or_default()
    }

    pub async fn snapshot(&self) -> BTreeMap<OperationKind, KindStats> {
        self.inner.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_record_separates_empty_from_unavailable() {
        let stats = OperationStats::new();
        let kind = OperationKind::ResearchPapers;

        stats.record(kind, Settlement::Completed { empty: true }, Duration::from_millis(10)).await;
        stats.record(kind, Settlement::DegradedError, Duration::from_millis(5)).await;
        stats.record(kind, Settlement::DegradedTimeout, Duration::from_millis(7)).await;

        let recorded = stats.get(kind).await;
        assert_eq!(recorded.completed, 1);
        assert_eq!(recorded.completed_empty, 1);
        assert_eq!(recorded.degraded_error, 1);
        assert_eq!(recorded.degraded_timeout, 1);
        assert_eq!(recorded.degraded(), 2);
        assert_eq!(recorded.total(), 3);
        assert_eq!(recorded.total_elapsed_ms, 22);
    }

    #[tokio::test]
    async fn test_snapshot_only_lists_seen_kinds() {
        let stats = OperationStats::new();
        stats.record(OperationKind::Quiz, Settlement::FailedError, Duration::ZERO).await;

        let snapshot = stats.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[&OperationKind::Quiz].failed_error, 1);
        assert_eq!(stats.get(OperationKind::Summary).await, KindStats::default());
    }
}
