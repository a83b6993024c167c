//! Test helpers: orchestrator construction and canned workers

use std::time::Duration;

use orchestrator::{BoundedOrchestrator, PolicyTable};
use shared::OperationKind;

use super::fixtures::TestFixtures;

/// Builder for orchestrators with shortened deadlines
pub struct OrchestratorBuilder {
    table: PolicyTable,
}

impl OrchestratorBuilder {
    pub fn new() -> Self {
        Self { table: PolicyTable::default() }
    }

    /// Shorten every kind's deadline to the same value
    pub fn with_all_timeouts(mut self, timeout: Duration) -> Self {
        for kind in OperationKind::ALL {
            self.table = self.table.with_timeout(kind, timeout);
        }
        self
    }

    pub fn with_timeout(mut self, kind: OperationKind, timeout: Duration) -> Self {
        self.table = self.table.with_timeout(kind, timeout);
        self
    }

    pub fn build(self) -> BoundedOrchestrator {
        BoundedOrchestrator::new(self.table)
    }
}

pub struct TestHelpers;

impl TestHelpers {
    /// Orchestrator whose deadlines are all [`TestFixtures::short_deadline`]
    pub fn fast_orchestrator() -> BoundedOrchestrator {
        OrchestratorBuilder::new()
            .with_all_timeouts(TestFixtures::short_deadline())
            .build()
    }

    /// Resolves with `value` after `delay`
    pub async fn slow_ok<T>(value: T, delay: Duration) -> Result<T, String> {
        tokio::time::sleep(delay).await;
        Ok(value)
    }

    pub async fn unavailable<T>(message: &str) -> Result<T, String> {
        Err(message.to_string())
    }
}
