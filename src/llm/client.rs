use super::types::*;
use crate::{Error, Result, config::LlmConfig};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn create_chat_completion(&self, request: CompletionRequest) -> Result<Completion>;
}

/// Chat-completion client for OpenAI-compatible endpoints.
///
/// Sent over `reqwest` so that a failed call keeps the upstream status code.
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
    temperature: f32,
    max_tokens: u32,
}

// Only the fields the proxy reads; compatible servers often omit the rest.
#[derive(Debug, Default, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    error: UpstreamErrorDetail,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorDetail {
    message: String,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Self {
        let api_key = config.api_key().map(String::from);

        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request<'a>(&'a self, request: &'a CompletionRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

impl ChatResponse {
    /// Text of the first choice, if it has any.
    fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| match message.content {
                Some(Value::String(text)) => Some(text),
                _ => None,
            })
    }
}

/// Pulls the human-readable message out of an upstream error body.
fn upstream_error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<UpstreamErrorBody>(body) {
        return parsed.error.message;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Upstream request failed")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn create_chat_completion(&self, request: CompletionRequest) -> Result<Completion> {
        let api_key = self.api_key.as_deref().ok_or(Error::MissingApiKey)?;

        debug!(
            "Creating chat completion with {} messages",
            request.messages.len()
        );

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&self.build_request(&request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = upstream_error_message(status, &body);
            error!("Completion API error: {} - {}", status, message);
            return Err(Error::upstream(status.as_u16(), message));
        }

        let body = response.bytes().await?;
        let completion: ChatResponse = serde_json::from_slice(&body)
            .map_err(|e| Error::llm(format!("Unexpected completion response: {}", e)))?;

        debug!(
            "Received chat completion response with {} choices",
            completion.choices.len()
        );

        let model = completion.model.clone();
        Ok(Completion {
            model,
            content: completion.first_content(),
        })
    }
}
