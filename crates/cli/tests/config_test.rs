//! # Configuration Tests
//!
//! `multiapp-cli` is a binary crate, so the config module is included
//! directly into this test binary.

#[path = "../src/config.rs"]
mod config;

use self::config::{get_config, ConfigError};
use multiapp::ProviderKind;
use std::env;
use std::fs;
use std::sync::Mutex;
use tempfile::tempdir;

// Environment variables are process-global; tests touching them run one at a time.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env_vars() {
    for var in [
        "MULTIAPP_PROVIDER__PROVIDER",
        "MULTIAPP_PROVIDER__API_URL",
        "MULTIAPP_PROVIDER__API_KEY",
        "MULTIAPP_PROVIDER__MODEL_NAME",
        "MULTIAPP_PROVIDER__TEMPERATURE",
        "MULTIAPP_SUMMARY_CHAR_LIMIT",
        "MULTIAPP_CODE_LANGUAGE",
        "MULTIAPP_TRACING_API_KEY",
        "MULTIAPP_LOG_FILE",
        "LANGCHAIN_API_KEY",
        "TEST_MODEL_NAME",
    ] {
        env::remove_var(var);
    }
}

#[test]
fn test_get_config_defaults() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();

    let config = get_config(None).expect("Defaults should load without any file");

    assert_eq!(config.provider.provider, ProviderKind::Ollama);
    assert_eq!(config.provider.api_url, "http://localhost:11434");
    assert_eq!(config.provider.model_name, "llama2");
    assert_eq!(config.provider.api_key, None);
    assert_eq!(config.summary_char_limit, 5000);
    assert_eq!(config.code_language, "python");
    assert_eq!(config.tracing_api_key, None);
    assert_eq!(config.log_file, "multiapp-cli.log");
    assert_eq!(config.source_file, None);
}

#[test]
fn test_env_vars_override_defaults() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();

    env::set_var("MULTIAPP_PROVIDER__PROVIDER", "local");
    env::set_var("MULTIAPP_PROVIDER__API_URL", "http://localhost:1234/v1/chat/completions");
    env::set_var("MULTIAPP_PROVIDER__MODEL_NAME", "mistral");
    env::set_var("MULTIAPP_SUMMARY_CHAR_LIMIT", "1200");

    let config = get_config(None).expect("Configuration should load successfully");

    assert_eq!(config.provider.provider, ProviderKind::Local);
    assert_eq!(
        config.provider.api_url,
        "http://localhost:1234/v1/chat/completions"
    );
    assert_eq!(config.provider.model_name, "mistral");
    assert_eq!(config.summary_char_limit, 1200);

    clear_env_vars();
}

#[test]
fn test_yaml_file_with_substitution() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();
    env::set_var("TEST_MODEL_NAME", "codellama");

    let dir = tempdir().unwrap();
    let path = dir.path().join("multiapp.yml");
    fs::write(
        &path,
        r#"
provider:
  provider: ollama
  api_url: "http://gpu-box:11434"
  model_name: "${TEST_MODEL_NAME}"
  temperature: 0.2
code_language: rust
"#,
    )
    .unwrap();

    let config = get_config(path.to_str()).expect("Config file should load");

    assert_eq!(config.provider.api_url, "http://gpu-box:11434");
    assert_eq!(config.provider.model_name, "codellama");
    assert_eq!(config.provider.temperature, Some(0.2));
    assert_eq!(config.code_language, "rust");
    // Untouched keys keep their defaults.
    assert_eq!(config.summary_char_limit, 5000);
    assert_eq!(config.source_file.as_deref(), path.to_str());

    clear_env_vars();
}

#[test]
fn test_env_overrides_file() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();

    let dir = tempdir().unwrap();
    let path = dir.path().join("custom.yml");
    fs::write(&path, "provider:\n  model_name: from-file\n").unwrap();
    env::set_var("MULTIAPP_PROVIDER__MODEL_NAME", "from-env");

    let config = get_config(path.to_str()).unwrap();
    assert_eq!(config.provider.model_name, "from-env");

    clear_env_vars();
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();

    let result = get_config(Some("does/not/exist.yml"));
    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

#[test]
fn test_tracing_key_from_langchain_env() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();

    env::set_var("LANGCHAIN_API_KEY", "ls-key");
    let config = get_config(None).unwrap();
    assert_eq!(config.tracing_api_key, Some("ls-key".to_string()));

    // An empty value is treated as absent.
    env::set_var("LANGCHAIN_API_KEY", "");
    let config = get_config(None).unwrap();
    assert_eq!(config.tracing_api_key, None);

    clear_env_vars();
}
