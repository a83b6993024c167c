//! Research paper discovery via the Semantic Scholar Graph API

use async_trait::async_trait;
use serde::Deserialize;
use shared::{Component, ResearchPaper, component_info};

use crate::core::prompt;
use crate::error::{AgentError, AgentResult, ApiFailure};
use crate::traits::PaperDiscovery;

pub const SEMANTIC_SCHOLAR_BASE_URL: &str = "https://api.semanticscholar.org/graph/v1";
const SERVICE: &str = "semantic_scholar";
const FIELDS: &str = "title,authors,year,abstract,url,venue,citationCount";
/// Largest page the search endpoint accepts
const MAX_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<PaperRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaperRecord {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<AuthorRecord>,
    year: Option<u32>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    url: Option<String>,
    venue: Option<String>,
    citation_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct AuthorRecord {
    name: Option<String>,
}

impl PaperRecord {
    fn into_paper(self) -> Option<ResearchPaper> {
        let title = self.title.filter(|t| !t.trim().is_empty())?;
        Some(ResearchPaper {
            title,
            authors: self.authors.into_iter().filter_map(|a| a.name).collect(),
            year: self.year,
            abstract_text: self.abstract_text,
            url: self.url,
            venue: self.venue.filter(|v| !v.is_empty()),
            citation_count: self.citation_count,
        })
    }
}

/// Paper discovery client for Semantic Scholar
#[derive(Debug, Clone)]
pub struct SemanticScholarClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl SemanticScholarClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }
}

impl Default for SemanticScholarClient {
    fn default() -> Self {
        Self::new(SEMANTIC_SCHOLAR_BASE_URL, None)
    }
}

#[async_trait]
impl PaperDiscovery for SemanticScholarClient {
    async fn find_papers(&self, keywords: &[String], topic: &str, max: u32) -> AgentResult<Vec<ResearchPaper>> {
        let query = prompt::search_query(keywords, topic);
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let limit = max.clamp(1, MAX_LIMIT).to_string();
        let mut request = self
            .http
            .get(format!("{}/paper/search", self.base_url.trim_end_matches('/')))
            .query(&[("query", query.as_str()), ("limit", limit.as_str()), ("fields", FIELDS)]);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AgentError::api(SERVICE, ApiFailure::NetworkError(e.to_string())))?;
        if !response.status().is_success() {
            return Err(AgentError::api(SERVICE, ApiFailure::from_status(response.status(), SERVICE)));
        }

        let search: SearchResponse = response.json().await.map_err(|e| {
            AgentError::api(SERVICE, ApiFailure::InvalidRequest(format!("Failed to parse response: {e}")))
        })?;

        let papers: Vec<ResearchPaper> = search
            .data
            .into_iter()
            .filter_map(PaperRecord::into_paper)
            .take(max as usize)
            .collect();

        component_info!(Component::Agents, query = %query, found = papers.len(), "📚 Paper search finished");
        Ok(papers)
    }
}
