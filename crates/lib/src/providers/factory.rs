//! # AI Provider Factory
//!
//! Creates the configured completion client so every consumer (the CLI, tests)
//! builds providers the same way.

use crate::{
    errors::InferenceError,
    providers::ai::{local::LocalAiProvider, ollama::OllamaProvider, CompletionClient},
    types::{ProviderConfig, ProviderKind},
};
use tracing::info;

/// Creates a completion client from a provider configuration.
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn CompletionClient>, InferenceError> {
    if config.api_url.trim().is_empty() {
        return Err(InferenceError::MissingAiProvider(
            "api_url must be set for the AI provider".to_string(),
        ));
    }

    let provider: Box<dyn CompletionClient> = match config.provider {
        ProviderKind::Ollama => {
            info!(
                "Configuring Ollama provider at {} with model '{}'",
                config.api_url, config.model_name
            );
            Box::new(
                OllamaProvider::new(&config.api_url, config.model_name.clone())?
                    .with_temperature(config.temperature),
            )
        }
        ProviderKind::Local => {
            info!(
                "Configuring Local AI provider at {} with model '{}'",
                config.api_url, config.model_name
            );
            let model = Some(config.model_name.clone()).filter(|m| !m.is_empty());
            Box::new(
                LocalAiProvider::new(config.api_url.clone(), config.api_key.clone(), model)?
                    .with_temperature(config.temperature),
            )
        }
    };

    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_url_is_rejected() {
        let config = ProviderConfig {
            api_url: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            create_provider(&config),
            Err(InferenceError::MissingAiProvider(_))
        ));
    }

    #[test]
    fn default_config_builds_ollama() {
        let provider = create_provider(&ProviderConfig::default()).unwrap();
        assert!(format!("{provider:?}").contains("OllamaProvider"));
    }
}
