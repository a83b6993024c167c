//! Core shared types and identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SharedError;

/// Component tag attached to every log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    /// HTTP surface and session handling
    Api,
    /// Bounded orchestrator and policy table
    Orchestrator,
    /// Completion, extraction and discovery collaborators
    Agents,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Api => write!(f, "api"),
            Component::Orchestrator => write!(f, "orchestrator"),
            Component::Agents => write!(f, "agents"),
        }
    }
}

/// Distinguishable generation/discovery actions, each with its own policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationKind {
    Upload,
    Summary,
    Flashcards,
    Quiz,
    ResearchPapers,
    Videos,
    WebResources,
    QuestionAnswer,
}

impl OperationKind {
    pub const ALL: [OperationKind; 8] = [
        OperationKind::Upload,
        OperationKind::Summary,
        OperationKind::Flashcards,
        OperationKind::Quiz,
        OperationKind::ResearchPapers,
        OperationKind::Videos,
        OperationKind::WebResources,
        OperationKind::QuestionAnswer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Upload => "upload",
            OperationKind::Summary => "summary",
            OperationKind::Flashcards => "flashcards",
            OperationKind::Quiz => "quiz",
            OperationKind::ResearchPapers => "research-papers",
            OperationKind::Videos => "videos",
            OperationKind::WebResources => "web-resources",
            OperationKind::QuestionAnswer => "question-answer",
        }
    }

    /// Discovery kinds search external corpora and need topic keywords first
    pub fn is_discovery(&self) -> bool {
        matches!(
            self,
            OperationKind::ResearchPapers | OperationKind::Videos | OperationKind::WebResources
        )
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s.to_lowercase())
            .ok_or_else(|| SharedError::UnknownOperationKind { input: s.to_string() })
    }
}

/// What a bounded operation returns when it fails or runs out of time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Report the failure to the caller
    Fail,
    /// Succeed with an empty collection
    EmptyList,
    /// Succeed with the kind's predefined placeholder content
    StaticPayload,
}

impl FallbackPolicy {
    /// Whether an expired deadline turns into a degraded success
    pub fn masks_timeouts(&self) -> bool {
        !matches!(self, FallbackPolicy::Fail)
    }

    /// Whether a collaborator error turns into a degraded success
    pub fn masks_errors(&self) -> bool {
        matches!(self, FallbackPolicy::EmptyList)
    }
}

impl fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackPolicy::Fail => write!(f, "fail"),
            FallbackPolicy::EmptyList => write!(f, "empty_list"),
            FallbackPolicy::StaticPayload => write!(f, "static_payload"),
        }
    }
}

impl FromStr for FallbackPolicy {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "fail" => Ok(FallbackPolicy::Fail),
            "empty_list" => Ok(FallbackPolicy::EmptyList),
            "static_payload" => Ok(FallbackPolicy::StaticPayload),
            _ => Err(SharedError::UnknownFallbackPolicy { input: s.to_string() }),
        }
    }
}

/// Question/answer study card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}

/// Multiple choice question with exactly four options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}

impl QuizQuestion {
    pub const OPTION_COUNT: usize = 4;

    /// Four options and an index pointing into them
    pub fn is_well_formed(&self) -> bool {
        !self.question.trim().is_empty()
            && self.options.len() == Self::OPTION_COUNT
            && self.correct_answer < self.options.len()
    }
}

/// Research paper metadata from a discovery collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchPaper {
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub citation_count: Option<u64>,
}

/// Educational video metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Web learning resource metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebResource {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_resource_type")]
    pub resource_type: String,
}

/// Topic and search keywords derived from document text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicKeywords {
    pub topic: String,
    /// Keywords suited for searching external corpora
    pub keywords: Vec<String>,
    /// Every keyword considered, including the search subset
    pub all_keywords: Vec<String>,
}

/// Role of a chat message sent to the completion service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One message in a completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: ChatRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }
}

/// Outcome flag reported by the document extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    Success,
    Error,
}

/// Text and metrics extracted from an uploaded document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub status: ExtractionStatus,
    pub message: String,
    pub text: String,
    pub word_count: usize,
    pub page_count: usize,
    pub methods_used: Vec<String>,
}

impl ExtractionReport {
    /// Report for a document whose text could not be read at all
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: ExtractionStatus::Error,
            message: message.into(),
            text: String::new(),
            word_count: 0,
            page_count: 0,
            methods_used: Vec::new(),
        }
    }
}

fn default_category() -> String {
    "General".to_string()
}

fn default_difficulty() -> String {
    "Medium".to_string()
}

fn default_resource_type() -> String {
    "article".to_string()
}
