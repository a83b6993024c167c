//! Shared state handed to every request handler

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use agents::{
    CompletionClient, DocumentExtractor, KeywordExtractor, PaperDiscovery, ResourceDiscovery, StudyGenerator,
    VideoDiscovery,
};
use orchestrator::BoundedOrchestrator;

use crate::config::ServerConfig;
use crate::error::{WebServerError, WebServerResult};
use crate::session::{Session, SessionStore};

/// The external collaborators, behind their traits
#[derive(Clone)]
pub struct Collaborators {
    pub completion: Arc<dyn CompletionClient>,
    pub extractor: Arc<dyn DocumentExtractor>,
    pub study: Arc<dyn StudyGenerator>,
    pub keywords: Arc<dyn KeywordExtractor>,
    pub papers: Arc<dyn PaperDiscovery>,
    pub videos: Arc<dyn VideoDiscovery>,
    pub resources: Arc<dyn ResourceDiscovery>,
}

/// Application state, cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub sessions: Arc<dyn SessionStore>,
    pub orchestrator: BoundedOrchestrator,
    pub collaborators: Collaborators,
    ready: Arc<AtomicBool>,
    started_at: Instant,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        sessions: Arc<dyn SessionStore>,
        orchestrator: BoundedOrchestrator,
        collaborators: Collaborators,
    ) -> Self {
        Self {
            config: Arc::new(config),
            sessions,
            orchestrator,
            collaborators,
            ready: Arc::new(AtomicBool::new(true)),
            started_at: Instant::now(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Relaxed)
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::Relaxed);
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Session under `id`, or the not-found error every generation endpoint returns
    pub async fn require_session(&self, id: &str) -> WebServerResult<Arc<Session>> {
        self.sessions.get(id).await.ok_or_else(WebServerError::no_session)
    }
}
