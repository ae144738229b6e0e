//! # Shared Constants
//!
//! Values shared across the crates in the `multiapp` workspace.

/// The default number of characters of a document sent for summarization.
pub const DEFAULT_SUMMARY_CHAR_LIMIT: usize = 5000;

/// The default Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// The default model served by the local backend.
pub const DEFAULT_MODEL: &str = "llama2";

/// The language tag used when rendering generated code.
pub const DEFAULT_CODE_LANGUAGE: &str = "python";

/// The log target for per-request run records.
pub const RUN_LOG_TARGET: &str = "multiapp::runs";
