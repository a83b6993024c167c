//! Research paper, video and web resource discovery
//!
//! Discovery is two steps inside one bounded operation: topic and keyword
//! extraction under its own sub-deadline, then the search itself. Any failure
//! or timeout settles as an empty list with a 200.

use std::future::Future;
use std::time::Duration;

use agents::{AgentError, AgentResult};
use axum::Json;
use axum::extract::State;
use orchestrator::Payload;
use shared::{Component, OperationKind, TopicKeywords, component_debug, component_info};
use thiserror::Error;

use crate::error::{WebServerError, WebServerResult};
use crate::state::AppState;
use crate::types::{
    PapersResponse, ResearchQuery, ResourcesQuery, ResourcesResponse, STATUS_SUCCESS, VideosQuery, VideosResponse,
};
use crate::web::{ApiQuery, SessionId};

#[derive(Error, Debug)]
enum DiscoveryError {
    #[error("keyword extraction timed out after {}s", .0.as_secs_f64())]
    KeywordTimeout(Duration),

    #[error(transparent)]
    Agent(#[from] AgentError),
}

async fn discover<T, F, Fut>(
    state: &AppState,
    kind: OperationKind,
    session_id: &str,
    requested: Option<i64>,
    search: F,
) -> WebServerResult<Vec<T>>
where
    Vec<T>: Payload,
    F: FnOnce(TopicKeywords, u32) -> Fut + Send + 'static,
    Fut: Future<Output = AgentResult<Vec<T>>> + Send + 'static,
{
    let session = state.require_session(session_id).await?;
    let policies = state.orchestrator.policies();
    let max = policies.clamp_count(kind, requested);
    let text = policies.prepare_text(kind, &session.text).into_owned();
    let keyword_timeout = policies.keyword_timeout();

    component_info!(Component::Api, session_id = %session_id, kind = %kind, max, "🔍 Starting {}", kind);

    let keywords = state.collaborators.keywords.clone();
    let operation = async move {
        let topic = tokio::time::timeout(keyword_timeout, keywords.extract_topic_and_keywords(&text))
            .await
            .map_err(|_| DiscoveryError::KeywordTimeout(keyword_timeout))??;

        component_debug!(
            Component::Api,
            kind = %kind,
            topic = %topic.topic,
            keywords = topic.keywords.len(),
            "Extracted search terms"
        );

        Ok::<_, DiscoveryError>(search(topic, max).await?)
    };

    let found = state
        .orchestrator
        .execute(kind, operation)
        .await
        .map_err(|e| WebServerError::from_operation(e, "Discovery"))?
        .into_inner();

    Ok(found)
}

pub async fn discover_research(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    ApiQuery(query): ApiQuery<ResearchQuery>,
) -> WebServerResult<Json<PapersResponse>> {
    let papers = state.collaborators.papers.clone();
    let found = discover(&state, OperationKind::ResearchPapers, &session_id, query.max_papers, move |topic, max| {
        async move { papers.find_papers(&topic.keywords, &topic.topic, max).await }
    })
    .await?;

    Ok(Json(PapersResponse {
        count: found.len(),
        papers: found,
        status: STATUS_SUCCESS.to_string(),
    }))
}

pub async fn discover_videos(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    ApiQuery(query): ApiQuery<VideosQuery>,
) -> WebServerResult<Json<VideosResponse>> {
    let videos = state.collaborators.videos.clone();
    let found = discover(&state, OperationKind::Videos, &session_id, query.max_videos, move |topic, max| {
        async move { videos.find_videos(&topic.keywords, &topic.topic, max).await }
    })
    .await?;

    Ok(Json(VideosResponse {
        count: found.len(),
        videos: found,
        status: STATUS_SUCCESS.to_string(),
    }))
}

pub async fn discover_resources(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    ApiQuery(query): ApiQuery<ResourcesQuery>,
) -> WebServerResult<Json<ResourcesResponse>> {
    let resources = state.collaborators.resources.clone();
    let found = discover(&state, OperationKind::WebResources, &session_id, query.max_resources, move |topic, max| {
        async move { resources.find_resources(&topic.keywords, &topic.topic, max).await }
    })
    .await?;

    Ok(Json(ResourcesResponse {
        count: found.len(),
        resources: found,
        status: STATUS_SUCCESS.to_string(),
    }))
}
