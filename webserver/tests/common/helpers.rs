//! Test helpers: app construction, slow fakes and request plumbing

use std::sync::Arc;
use std::time::Duration;

use agents::{
    AgentResult, CompletionClient, DocumentExtractor, KeywordExtractor, MockCompletionClient, MockDocumentExtractor,
    MockKeywordExtractor, MockPaperDiscovery, MockResourceDiscovery, MockStudyGenerator, MockVideoDiscovery,
    PaperDiscovery, ResourceDiscovery, StudyGenerator, VideoDiscovery,
};
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use orchestrator::{BoundedOrchestrator, PolicyTable};
use serde_json::Value;
use shared::{Flashcard, OperationKind, QuizQuestion, TopicKeywords};
use tower::ServiceExt;
use webserver::{AppState, Collaborators, InMemorySessionStore, ServerConfig, SessionStore, WebServer};

use super::fixtures::TestFixtures;

pub const BOUNDARY: &str = "study-test-boundary";

/// Builds an [`AppState`] whose collaborators default to mocks with no
/// expectations, so any unexpected call fails the request
pub struct AppBuilder {
    table: PolicyTable,
    config: ServerConfig,
    sessions: Arc<dyn SessionStore>,
    completion: Arc<dyn CompletionClient>,
    extractor: Arc<dyn DocumentExtractor>,
    study: Arc<dyn StudyGenerator>,
    keywords: Arc<dyn KeywordExtractor>,
    papers: Arc<dyn PaperDiscovery>,
    videos: Arc<dyn VideoDiscovery>,
    resources: Arc<dyn ResourceDiscovery>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            table: PolicyTable::default(),
            config: ServerConfig::default(),
            sessions: Arc::new(InMemorySessionStore::new()),
            completion: Arc::new(MockCompletionClient::new()),
            extractor: Arc::new(MockDocumentExtractor::new()),
            study: Arc::new(MockStudyGenerator::new()),
            keywords: Arc::new(MockKeywordExtractor::new()),
            papers: Arc::new(MockPaperDiscovery::new()),
            videos: Arc::new(MockVideoDiscovery::new()),
            resources: Arc::new(MockResourceDiscovery::new()),
        }
    }

    pub fn with_timeout(mut self, kind: OperationKind, timeout: Duration) -> Self {
        self.table = self.table.with_timeout(kind, timeout);
        self
    }

    pub fn with_keyword_timeout(mut self, timeout: Duration) -> Self {
        self.table = self.table.with_keyword_timeout(timeout);
        self
    }

    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_sessions(mut self, sessions: Arc<dyn SessionStore>) -> Self {
        self.sessions = sessions;
        self
    }

    pub fn with_extractor(mut self, extractor: impl DocumentExtractor + 'static) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    pub fn with_study(mut self, study: impl StudyGenerator + 'static) -> Self {
        self.study = Arc::new(study);
        self
    }

    pub fn with_keywords(mut self, keywords: impl KeywordExtractor + 'static) -> Self {
        self.keywords = Arc::new(keywords);
        self
    }

    pub fn with_papers(mut self, papers: impl PaperDiscovery + 'static) -> Self {
        self.papers = Arc::new(papers);
        self
    }

    pub fn with_videos(mut self, videos: impl VideoDiscovery + 'static) -> Self {
        self.videos = Arc::new(videos);
        self
    }

    pub fn with_resources(mut self, resources: impl ResourceDiscovery + 'static) -> Self {
        self.resources = Arc::new(resources);
        self
    }

    pub fn build(self) -> AppState {
        AppState::new(
            self.config,
            self.sessions,
            BoundedOrchestrator::new(self.table),
            Collaborators {
                completion: self.completion,
                extractor: self.extractor,
                study: self.study,
                keywords: self.keywords,
                papers: self.papers,
                videos: self.videos,
                resources: self.resources,
            },
        )
    }
}

/// Study generator that answers every call after `delay`
pub struct SlowStudy {
    pub delay: Duration,
}

#[async_trait]
impl StudyGenerator for SlowStudy {
    async fn generate_summary(&self, _text: &str) -> AgentResult<String> {
        tokio::time::sleep(self.delay).await;
        Ok("A late summary".to_string())
    }

    async fn generate_flashcards(&self, _text: &str, count: u32) -> AgentResult<Vec<Flashcard>> {
        tokio::time::sleep(self.delay).await;
        Ok(TestFixtures::flashcards(count as usize))
    }

    async fn generate_quiz(&self, _text: &str, count: u32) -> AgentResult<Vec<QuizQuestion>> {
        tokio::time::sleep(self.delay).await;
        Ok(TestFixtures::quiz(count as usize))
    }

    async fn answer_question(&self, _text: &str, _question: &str) -> AgentResult<String> {
        tokio::time::sleep(self.delay).await;
        Ok("A late answer".to_string())
    }
}

/// Keyword extractor that answers after `delay`
pub struct SlowKeywords {
    pub delay: Duration,
}

#[async_trait]
impl KeywordExtractor for SlowKeywords {
    async fn extract_topic_and_keywords(&self, _text: &str) -> AgentResult<TopicKeywords> {
        tokio::time::sleep(self.delay).await;
        Ok(TestFixtures::topic())
    }
}

pub struct TestHelpers;

impl TestHelpers {
    pub fn router(state: &AppState) -> Router {
        WebServer::new(state.clone()).build_router()
    }

    /// Send one request through a fresh router and decode the JSON body
    pub async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = Self::router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
    }

    pub fn post(uri: &str) -> Request<Body> {
        Request::builder().method("POST").uri(uri).body(Body::empty()).unwrap()
    }

    pub fn delete(uri: &str) -> Request<Body> {
        Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap()
    }

    pub fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Multipart body with a single `file` field
    pub fn multipart_body(filename: &str, bytes: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n").as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    pub fn upload(uri: &str, filename: &str, bytes: &[u8]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(Self::multipart_body(filename, bytes)))
            .unwrap()
    }

    pub async fn store_session(state: &AppState, id: &str, session: webserver::Session) {
        state.sessions.put(id, session).await;
    }
}
