use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::retry::{RetryConfig, with_retry};
use super::types::{ChatMessage, ChatRequest, ChatResponse};
use super::{LanguageModel, ServiceError};
use crate::config::LlmSettings;

/// OpenAI-compatible chat-completions client
pub struct OpenAiClient {
    http: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    retry: RetryConfig,
}

impl OpenAiClient {
    pub fn new(settings: &LlmSettings) -> Result<Self, ServiceError> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ServiceError::ApiKeyMissing(settings.base_url.clone()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ServiceError::RequestFailed(format!("build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: settings.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            retry: RetryConfig {
                max_retries: settings.max_retries,
                ..Default::default()
            },
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// One round trip, no retry
    async fn complete_once(&self, prompt: &str) -> Result<String, ServiceError> {
        let response = self
            .http
            .post(format!("{}/chat/completions", self.endpoint))
            .bearer_auth(&self.api_key)
            .json(&self.request(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ServiceError::from_http_status(status.as_u16(), &body));
        }

        let res: ChatResponse = response.json().await?;
        first_completion(res)
    }
}

fn first_completion(res: ChatResponse) -> Result<String, ServiceError> {
    res.choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(ServiceError::EmptyCompletion)
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        with_retry(&self.retry, "chat completion", || self.complete_once(prompt)).await
    }
}
