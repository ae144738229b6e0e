use crate::{
    errors::InferenceError,
    providers::ai::CompletionClient,
    types::{Message, Prompt},
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::debug;

// --- OpenAI-compatible request and response structures ---

#[derive(Serialize)]
struct LocalAiRequest<'a> {
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct LocalAiResponse {
    #[serde(default)]
    choices: Vec<LocalAiChoice>,
}

#[derive(Deserialize, Debug)]
struct LocalAiChoice {
    message: LocalAiMessage,
}

#[derive(Deserialize, Debug)]
struct LocalAiMessage {
    content: Option<String>,
}

// --- Local Provider implementation ---

/// A provider for interacting with a local or OpenAI-compatible API.
///
/// `api_url` is the full `chat/completions` endpoint.
#[derive(Clone, Debug)]
pub struct LocalAiProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
}

impl LocalAiProvider {
    /// Creates a new `LocalAiProvider`.
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        model: Option<String>,
    ) -> Result<Self, InferenceError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(InferenceError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
            temperature: None,
        })
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl CompletionClient for LocalAiProvider {
    async fn complete(&self, prompt: &Prompt) -> Result<String, InferenceError> {
        let request_body = LocalAiRequest {
            messages: prompt.messages(),
            model: self.model.as_deref(),
            temperature: self.temperature,
            stream: false,
        };

        let mut request_builder = self.client.post(&self.api_url);

        if let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            request_builder = request_builder.bearer_auth(key);
        }

        debug!(url = %self.api_url, messages = prompt.messages().len(), "--> Sending prompt to local AI backend");

        let response = request_builder
            .json(&request_body)
            .send()
            .await
            .map_err(InferenceError::AiRequest)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::AiApi { status, body });
        }

        let local_ai_response: LocalAiResponse = response
            .json()
            .await
            .map_err(InferenceError::AiDeserialization)?;

        local_ai_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(InferenceError::EmptyResponse)
    }
}
