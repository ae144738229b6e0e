use crate::types::Mode;
use thiserror::Error;

/// Errors raised while talking to an LLM backend.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to the AI backend: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI backend response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI backend returned an error (status {status}): {body}")]
    AiApi { status: u16, body: String },
    #[error("AI backend returned no text content")]
    EmptyResponse,
    #[error("AI provider is not configured: {0}")]
    MissingAiProvider(String),
}

/// A generic error type shared by all text extractors.
///
/// Each extractor crate maps its own failures (PDF object errors, HTTP errors)
/// into these variants so the controller can treat every source uniformly.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to parse document: {0}")]
    DocumentParse(String),

    #[error("Failed to fetch content: {0}")]
    Fetch(String),
}

/// The error surfaced to the user for a single mode request.
#[derive(Error, Debug)]
pub enum ModeError {
    #[error("Could not read the document: {0}")]
    DocumentParse(String),

    #[error("Could not fetch the web page: {0}")]
    Fetch(String),

    #[error("The language model request failed: {0}")]
    Inference(#[from] InferenceError),

    #[error("{field} is required for {mode}")]
    Validation { mode: Mode, field: &'static str },
}

impl From<ExtractError> for ModeError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::DocumentParse(msg) => ModeError::DocumentParse(msg),
            ExtractError::Fetch(msg) => ModeError::Fetch(msg),
        }
    }
}
