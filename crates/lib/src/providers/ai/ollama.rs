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

// --- Ollama chat API structures ---

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Deserialize, Debug)]
struct OllamaChatResponse {
    message: Option<OllamaMessage>,
}

#[derive(Deserialize, Debug)]
struct OllamaMessage {
    content: String,
}

// --- Ollama Provider implementation ---

/// A provider for a locally running Ollama server.
///
/// `api_url` is the server root (e.g. `http://localhost:11434`); requests go
/// to `{api_url}/api/chat` with streaming disabled.
#[derive(Clone, Debug)]
pub struct OllamaProvider {
    client: ReqwestClient,
    chat_url: String,
    model: String,
    temperature: Option<f32>,
}

impl OllamaProvider {
    /// Creates a new `OllamaProvider`.
    pub fn new(api_url: &str, model: String) -> Result<Self, InferenceError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(InferenceError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            chat_url: format!("{}/api/chat", api_url.trim_end_matches('/')),
            model,
            temperature: None,
        })
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionClient for OllamaProvider {
    async fn complete(&self, prompt: &Prompt) -> Result<String, InferenceError> {
        let request_body = OllamaChatRequest {
            model: &self.model,
            messages: prompt.messages(),
            stream: false,
            options: self.temperature.map(|temperature| OllamaOptions { temperature }),
        };

        debug!(url = %self.chat_url, model = %self.model, messages = prompt.messages().len(), "--> Sending prompt to Ollama");

        let response = self
            .client
            .post(&self.chat_url)
            .json(&request_body)
            .send()
            .await
            .map_err(InferenceError::AiRequest)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::AiApi { status, body });
        }

        let chat_response: OllamaChatResponse = response
            .json()
            .await
            .map_err(InferenceError::AiDeserialization)?;

        chat_response
            .message
            .map(|m| m.content)
            .ok_or(InferenceError::EmptyResponse)
    }
}
