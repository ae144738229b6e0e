//! # Application Configuration
//!
//! Defines the settings for the `multiapp` binary and loads them from
//! programmatic defaults, an optional `multiapp.yml` file and `MULTIAPP_`
//! environment variables, in that order of precedence.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use multiapp::{
    constants::{DEFAULT_CODE_LANGUAGE, DEFAULT_SUMMARY_CHAR_LIMIT},
    ProviderConfig,
};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// The file looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "multiapp.yml";
pub const DEFAULT_LOG_FILE: &str = "multiapp-cli.log";
/// Environment variable holding the optional run-tracing key.
pub const TRACING_KEY_VAR: &str = "LANGCHAIN_API_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    #[error("Configuration error: {0}")]
    General(String),
    /// Indicates an explicitly requested configuration file was not found.
    #[error("{0}")]
    NotFound(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `multiapp.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The completion backend. Overridden by `MULTIAPP_PROVIDER__*` variables.
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Characters of a PDF sent for summarization.
    pub summary_char_limit: usize,
    /// Language tag used when rendering generated code.
    pub code_language: String,
    /// Enables run records at `info` level. Falls back to `LANGCHAIN_API_KEY`.
    #[serde(default)]
    pub tracing_api_key: Option<String>,
    pub log_file: String,
    /// The YAML file that was loaded, if any. Set by `get_config`.
    #[serde(skip)]
    pub source_file: Option<String>,
}

// Reads a file and substitutes `${VAR}` references with environment values.
// Unset variables become empty strings.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(e.to_string()))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        env::var(&caps["var"]).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration.
///
/// Runs before logging is installed, so the chosen file is recorded in
/// `source_file` for the caller to log.
///
/// - Layer 1: programmatic defaults.
/// - Layer 2: the YAML file at `config_path_override`, or `multiapp.yml` in the
///   working directory if it exists. An explicit path that does not exist is an error.
/// - Layer 3: `MULTIAPP_`-prefixed variables, nested with `__`
///   (e.g. `MULTIAPP_PROVIDER__MODEL_NAME`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder()
        .set_default("summary_char_limit", DEFAULT_SUMMARY_CHAR_LIMIT as i64)?
        .set_default("code_language", DEFAULT_CODE_LANGUAGE)?
        .set_default("log_file", DEFAULT_LOG_FILE)?;

    let source_file = match config_path_override {
        Some(path) => {
            let content = read_and_substitute(path)?.ok_or_else(|| {
                ConfigError::NotFound(format!("Config file not found at '{path}'."))
            })?;
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
            Some(path.to_string())
        }
        None => match read_and_substitute(DEFAULT_CONFIG_FILE)? {
            Some(content) => {
                builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
                Some(DEFAULT_CONFIG_FILE.to_string())
            }
            None => None,
        },
    };

    let settings = builder
        .add_source(
            Environment::with_prefix("MULTIAPP")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;
    config.source_file = source_file;

    // An empty key (e.g. from an unset `${VAR}`) counts as no key.
    config.tracing_api_key = config
        .tracing_api_key
        .filter(|key| !key.is_empty())
        .or_else(|| env::var(TRACING_KEY_VAR).ok().filter(|key| !key.is_empty()));

    Ok(config)
}
