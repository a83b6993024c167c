//! Collaborator trait definitions for dependency injection

use std::path::Path;

use async_trait::async_trait;
use shared::{ChatMessage, ExtractionReport, Flashcard, QuizQuestion, ResearchPaper, TopicKeywords, Video, WebResource};
use tokio_util::sync::CancellationToken;

use crate::error::AgentResult;

/// Chat completion service
#[mockall::automock]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send messages and return the assistant's reply text
    async fn chat(&self, messages: Vec<ChatMessage>, max_tokens: u32) -> AgentResult<String>;
}

/// Blocking document text extraction, run on the blocking pool.
///
/// Implementations should return early with `AgentError::Cancelled` once
/// `cancel` fires.
#[mockall::automock]
pub trait DocumentExtractor: Send + Sync {
    fn extract(&self, path: &Path, cancel: &CancellationToken) -> AgentResult<ExtractionReport>;
}

/// Topic and search keyword extraction
#[mockall::automock]
#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    async fn extract_topic_and_keywords(&self, text: &str) -> AgentResult<TopicKeywords>;
}

/// Academic paper search
#[mockall::automock]
#[async_trait]
pub trait PaperDiscovery: Send + Sync {
    async fn find_papers(&self, keywords: &[String], topic: &str, max: u32) -> AgentResult<Vec<ResearchPaper>>;
}

/// Educational video search
#[mockall::automock]
#[async_trait]
pub trait VideoDiscovery: Send + Sync {
    async fn find_videos(&self, keywords: &[String], topic: &str, max: u32) -> AgentResult<Vec<Video>>;
}

/// Web learning resource search
#[mockall::automock]
#[async_trait]
pub trait ResourceDiscovery: Send + Sync {
    async fn find_resources(&self, keywords: &[String], topic: &str, max: u32) -> AgentResult<Vec<WebResource>>;
}

/// Study artifact generation from document text
#[mockall::automock]
#[async_trait]
pub trait StudyGenerator: Send + Sync {
    async fn generate_summary(&self, text: &str) -> AgentResult<String>;

    async fn generate_flashcards(&self, text: &str, count: u32) -> AgentResult<Vec<Flashcard>>;

    async fn generate_quiz(&self, text: &str, count: u32) -> AgentResult<Vec<QuizQuestion>>;

    /// Answer a free-form question about the document
    async fn answer_question(&self, text: &str, question: &str) -> AgentResult<String>;
}
