//! Study assistant server entry point

use std::sync::Arc;

use agents::{
    CompletionClient, LlmKeywordExtractor, LlmResourceFinder, OpenAiClient, PdfTextExtractor, SemanticScholarClient,
    StudyAgents, YouTubeClient,
};
use anyhow::Context;
use clap::Parser;
use orchestrator::BoundedOrchestrator;
use shared::{ChatMessage, Component, component_info, component_warn, logging};

use webserver::{AppState, Args, Collaborators, Credentials, InMemorySessionStore, ServerConfig, WebServer};

fn build_collaborators(args: &Args, credentials: &Credentials) -> Collaborators {
    let completion: Arc<dyn CompletionClient> = Arc::new(OpenAiClient::new(
        credentials.openai_api_key.clone(),
        args.openai_base_url.clone(),
        args.model.clone(),
    ));

    let videos = YouTubeClient::new(agents::YOUTUBE_BASE_URL.to_string(), credentials.youtube_api_key.clone());
    if !videos.is_configured() {
        component_warn!(Component::Agents, "YOUTUBE_API_KEY not set; video discovery will return no results");
    }

    Collaborators {
        extractor: Arc::new(PdfTextExtractor::new()),
        study: Arc::new(StudyAgents::new(completion.clone())),
        keywords: Arc::new(LlmKeywordExtractor::new(completion.clone())),
        papers: Arc::new(SemanticScholarClient::new(
            agents::SEMANTIC_SCHOLAR_BASE_URL.to_string(),
            credentials.semantic_scholar_api_key.clone(),
        )),
        videos: Arc::new(videos),
        resources: Arc::new(LlmResourceFinder::new(completion.clone())),
        completion,
    }
}

/// One tiny completion to surface credential or network problems early
async fn probe_completion_service(client: &dyn CompletionClient) {
    match client.chat(vec![ChatMessage::user("Test connection - respond with 'OK'")], 10).await {
        Ok(reply) => component_info!(Component::Agents, reply = %reply.trim(), "🔌 Completion service reachable"),
        Err(err) => logging::log_error(Component::Agents, "Completion service probe", &err),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let trace_endpoint = args
        .trace_ep
        .as_ref()
        .map(|url| logging::TracingEndpoint::new(url.clone()));
    logging::init_tracing_with_endpoint_and_level(trace_endpoint, Some(&args.log_level));

    let credentials = Credentials::from_env().context("Loading API credentials")?;
    let policies = args.policy_table().context("Loading policy table")?;
    let address = args.bind_address()?;

    component_info!(
        Component::Orchestrator,
        version = policies.version,
        keyword_timeout_ms = policies.keyword_timeout_ms,
        "📋 Policy table ready"
    );

    let collaborators = build_collaborators(&args, &credentials);
    if !args.skip_connection_test {
        probe_completion_service(collaborators.completion.as_ref()).await;
    }

    let state = AppState::new(
        ServerConfig::from_args(&args),
        Arc::new(InMemorySessionStore::new()),
        BoundedOrchestrator::new(policies),
        collaborators,
    );

    logging::log_startup(Component::Api, &format!("study assistant API on {address} (model {})", args.model));
    WebServer::new(state).run(address).await?;
    Ok(())
}
