use crate::config::Settings;
use crate::error::AppError;
use crate::llm::messages::{ChatMessage, SamplingParams};
use crate::llm::traits::LlmClient;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
    presence_penalty: f32,
    frequency_penalty: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.openai_base_url.clone(),
            settings.openai_model.clone(),
            settings.openai_api_key.clone(),
        )
    }

    fn headers(&self, api_key: &str) -> Result<HeaderMap, AppError> {
        let mut headers = HeaderMap::new();
        let value = format!("Bearer {}", api_key)
            .parse()
            .map_err(|_| AppError::Config("OPENAI_API_KEY contains invalid characters".to_string()))?;
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }
}

/// Best-effort extraction of `error.message` from an API error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        params: SamplingParams,
    ) -> Result<String, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::ExternalApi("OPENAI_API_KEY is not configured".to_string()))?;

        let payload = CompletionRequest {
            model: &self.model,
            messages: &messages,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            presence_penalty: params.presence_penalty,
            frequency_penalty: params.frequency_penalty,
        };

        info!(model = %self.model, messages = messages.len(), "Requesting chat completion");

        let res = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .headers(self.headers(api_key)?)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            error!("Chat completion failed with status {}", status);
            return Err(AppError::ExternalApi(format!(
                "Chat completion failed with status {}: {}",
                status,
                error_message(&body)
            )));
        }

        let completion: CompletionResponse = res
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Malformed completion response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| AppError::ExternalApi("Completion response had no content".to_string()))
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
