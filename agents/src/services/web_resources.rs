//! Web learning resource discovery through the completion service

use std::sync::Arc;

use async_trait::async_trait;
use shared::{Component, WebResource, component_info};

use crate::core::{parse, prompt};
use crate::error::AgentResult;
use crate::traits::{CompletionClient, ResourceDiscovery};

const RESOURCES_MAX_TOKENS: u32 = 1500;

/// Asks the completion service for reputable learning resources
pub struct LlmResourceFinder {
    client: Arc<dyn CompletionClient>,
}

impl LlmResourceFinder {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceDiscovery for LlmResourceFinder {
    async fn find_resources(&self, keywords: &[String], topic: &str, max: u32) -> AgentResult<Vec<WebResource>> {
        if keywords.is_empty() && topic.trim().is_empty() {
            return Ok(Vec::new());
        }

        let reply = self
            .client
            .chat(prompt::web_resources(keywords, topic, max), RESOURCES_MAX_TOKENS)
            .await?;
        let mut resources: Vec<WebResource> = parse::parse_items(&reply)?;
        resources.retain(|r| !r.title.trim().is_empty() && r.url.starts_with("http"));
        resources.dedup_by(|a, b| a.url == b.url);
        resources.truncate(max as usize);

        component_info!(Component::Agents, topic = %topic, found = resources.len(), "🌐 Resource search finished");
        Ok(resources)
    }
}
