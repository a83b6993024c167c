//! Session store: extracted document state keyed by session identifier
//!
//! One entry per identifier, overwritten by the next upload under the same
//! identifier and removed by an explicit clear. There is no expiry and no
//! capacity bound. Concurrent writers to one identifier race; the last write
//! wins.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::ExtractionReport;
use tokio::sync::RwLock;

/// Identifier used when the caller supplies none
pub const DEFAULT_SESSION_ID: &str = "default";

/// One uploaded document's extracted state; immutable once stored
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub text: String,
    pub filename: String,
    pub file_info: String,
    pub word_count: usize,
    pub page_count: usize,
    pub methods_used: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn from_upload(filename: &str, size_bytes: usize, report: ExtractionReport) -> Self {
        Self {
            file_info: format!("File: {} ({:.2} MB)", filename, size_bytes as f64 / (1024.0 * 1024.0)),
            filename: filename.to_string(),
            text: report.text,
            word_count: report.word_count,
            page_count: report.page_count,
            methods_used: report.methods_used,
            created_at: Utc::now(),
        }
    }
}

/// Metadata view of a session, without the text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub active: bool,
    pub session_id: String,
    pub filename: String,
    pub file_info: String,
    pub word_count: usize,
    pub page_count: usize,
    pub methods_used: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl SessionSnapshot {
    pub fn new(session_id: &str, session: &Session) -> Self {
        Self {
            active: true,
            session_id: session_id.to_string(),
            filename: session.filename.clone(),
            file_info: session.file_info.clone(),
            word_count: session.word_count,
            page_count: session.page_count,
            methods_used: session.methods_used.clone(),
            created_at: session.created_at,
        }
    }
}

/// Process-wide mapping from session identifier to session
#[mockall::automock]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store unconditionally, replacing any previous session under `id`
    async fn put(&self, id: &str, session: Session);

    async fn get(&self, id: &str) -> Option<Arc<Session>>;

    /// Remove the session; `false` when there was nothing to clear
    async fn delete(&self, id: &str) -> bool;

    async fn len(&self) -> usize;
}

/// In-memory session store
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Arc<Session>>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(&self, id: &str, session: Session) {
        self.sessions.write().await.insert(id.to_string(), Arc::new(session));
    }

    async fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.read().await.get(id).cloned()
    }

    async fn delete(&self, id: &str) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ExtractionStatus;

    fn report(words: usize) -> ExtractionReport {
        ExtractionReport {
            status: ExtractionStatus::Success,
            message: "ok".to_string(),
            text: vec!["word"; words].join(" "),
            word_count: words,
            page_count: 1,
            methods_used: vec!["text_layer".to_string()],
        }
    }

    #[tokio::test]
    async fn test_put_overwrites_previous_session() {
        let store = InMemorySessionStore::new();
        store.put("a", Session::from_upload("first.pdf", 1024, report(20))).await;
        store.put("a", Session::from_upload("second.pdf", 2048, report(30))).await;

        let session = store.get("a").await.unwrap();
        assert_eq!(session.filename, "second.pdf");
        assert_eq!(session.word_count, 30);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated_by_id() {
        let store = InMemorySessionStore::new();
        store.put("alice", Session::from_upload("a.pdf", 10, report(12))).await;

        assert!(store.get("bob").await.is_none());
        assert!(store.get("alice").await.is_some());
    }

    #[tokio::test]
    async fn test_delete_reports_whether_anything_was_cleared() {
        let store = InMemorySessionStore::new();
        store.put(DEFAULT_SESSION_ID, Session::from_upload("a.pdf", 10, report(12))).await;

        assert!(store.delete(DEFAULT_SESSION_ID).await);
        assert!(!store.delete(DEFAULT_SESSION_ID).await);
        assert_eq!(store.len().await, 0);
    }

    #[test]
    fn test_file_info_format() {
        let session = Session::from_upload("notes.pdf", 3 * 1024 * 1024 / 2, report(12));
        assert_eq!(session.file_info, "File: notes.pdf (1.50 MB)");
    }
}
