pub mod local;
pub mod ollama;

use crate::{errors::InferenceError, types::Prompt};
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

pub use local::LocalAiProvider;
pub use ollama::OllamaProvider;

/// A trait for sending a prompt to an LLM backend.
///
/// Implementations wait for the complete response; there is no partial or
/// streaming delivery and no retry.
#[async_trait]
pub trait CompletionClient: Send + Sync + Debug + DynClone {
    /// Sends the prompt and returns the model's full text response.
    async fn complete(&self, prompt: &Prompt) -> Result<String, InferenceError>;
}

dyn_clone::clone_trait_object!(CompletionClient);
