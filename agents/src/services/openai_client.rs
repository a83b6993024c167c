//! OpenAI chat completion client

use async_trait::async_trait;
use serde::Deserialize;
use shared::{ChatMessage, Component, component_debug};

use crate::error::{AgentError, AgentResult, ApiFailure};
use crate::traits::CompletionClient;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
const SERVICE: &str = "openai";

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

/// Completion client for the OpenAI chat completions API
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
            temperature: 0.7,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn chat(&self, messages: Vec<ChatMessage>, max_tokens: u32) -> AgentResult<String> {
        let request_start = std::time::Instant::now();
        let request_body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": max_tokens,
            "temperature": self.temperature,
        });

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AgentError::api(SERVICE, ApiFailure::NetworkError(e.to_string())))?;

        if !response.status().is_success() {
            return Err(AgentError::api(SERVICE, ApiFailure::from_status(response.status(), &self.model)));
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            AgentError::api(SERVICE, ApiFailure::InvalidRequest(format!("Failed to parse response: {e}")))
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| AgentError::api(SERVICE, ApiFailure::EmptyResponse))?;

        let (prompt_tokens, completion_tokens) = completion
            .usage
            .map(|u| (u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();
        component_debug!(
            Component::Agents,
            model = %self.model,
            prompt_tokens,
            completion_tokens,
            elapsed_ms = request_start.elapsed().as_millis() as u64,
            "Completion received"
        );

        Ok(content)
    }
}
