//! Request parameters and response bodies of the HTTP API

use std::collections::BTreeMap;

use orchestrator::KindStats;
use serde::{Deserialize, Serialize};
use shared::{ExtractionStatus, Flashcard, OperationKind, QuizQuestion, ResearchPaper, Video, WebResource};

pub const STATUS_SUCCESS: &str = "success";

/// `?session_id=` on any endpoint
#[derive(Debug, Default, Deserialize)]
pub struct SessionQuery {
    pub session_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FlashcardsQuery {
    pub num_cards: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuizQuery {
    pub num_questions: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResearchQuery {
    pub max_papers: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VideosQuery {
    pub max_videos: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResourcesQuery {
    pub max_resources: Option<i64>,
}

/// Body of `POST /ask-question`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub document_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub agents_initialized: bool,
    pub openai_key_configured: bool,
    pub active_sessions: usize,
    pub uptime_seconds: u64,
    /// Per-kind outcome counters; degraded and empty results are counted apart
    pub operations: BTreeMap<OperationKind, KindStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub status: ExtractionStatus,
    pub message: String,
    pub word_count: usize,
    pub page_count: usize,
    pub methods_used: Vec<String>,
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcardsResponse {
    pub flashcards: Vec<Flashcard>,
    pub count: usize,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResponse {
    pub quiz: Vec<QuizQuestion>,
    pub count: usize,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PapersResponse {
    pub papers: Vec<ResearchPaper>,
    pub count: usize,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideosResponse {
    pub videos: Vec<Video>,
    pub count: usize,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourcesResponse {
    pub resources: Vec<WebResource>,
    pub count: usize,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearSessionResponse {
    pub message: String,
    pub status: String,
}

/// `{"active": false, "message": ...}` when no session is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InactiveSession {
    pub active: bool,
    pub message: String,
}
