//! Educational video discovery via the YouTube Data API v3

use async_trait::async_trait;
use serde::Deserialize;
use shared::{Component, Video, component_info};

use crate::core::prompt;
use crate::error::{AgentError, AgentResult, ApiFailure};
use crate::traits::VideoDiscovery;

pub const YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
const SERVICE: &str = "youtube";
const MAX_RESULTS: u32 = 50;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    description: String,
    published_at: Option<String>,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

impl SearchItem {
    fn into_video(self) -> Option<Video> {
        let video_id = self.id.video_id?;
        let thumbnails = self.snippet.thumbnails;
        Some(Video {
            title: self.snippet.title,
            url: format!("https://www.youtube.com/watch?v={video_id}"),
            channel: self.snippet.channel_title,
            description: self.snippet.description,
            published_at: self.snippet.published_at,
            thumbnail: thumbnails.medium.or(thumbnails.default).map(|t| t.url),
        })
    }
}

/// Video discovery client for YouTube; needs an API key
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl YouTubeClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl VideoDiscovery for YouTubeClient {
    async fn find_videos(&self, keywords: &[String], topic: &str, max: u32) -> AgentResult<Vec<Video>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| AgentError::NotConfigured {
            service: SERVICE,
            message: "YOUTUBE_API_KEY is not set".to_string(),
        })?;

        let query = prompt::search_query(keywords, topic);
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let max_results = max.clamp(1, MAX_RESULTS).to_string();
        let response = self
            .http
            .get(format!("{}/search", self.base_url.trim_end_matches('/')))
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("safeSearch", "strict"),
                ("q", query.as_str()),
                ("maxResults", max_results.as_str()),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(|e| AgentError::api(SERVICE, ApiFailure::NetworkError(e.to_string())))?;
        if !response.status().is_success() {
            return Err(AgentError::api(SERVICE, ApiFailure::from_status(response.status(), SERVICE)));
        }

        let search: SearchResponse = response.json().await.map_err(|e| {
            AgentError::api(SERVICE, ApiFailure::InvalidRequest(format!("Failed to parse response: {e}")))
        })?;

        let videos: Vec<Video> = search
            .items
            .into_iter()
            .filter_map(SearchItem::into_video)
            .take(max as usize)
            .collect();

        component_info!(Component::Agents, query = %query, found = videos.len(), "🎥 Video search finished");
        Ok(videos)
    }
}
