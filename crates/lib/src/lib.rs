//! # multiapp
//!
//! The core of a small multi-mode LLM tool: it turns a selected mode and its
//! raw inputs (a question, a PDF, a URL) into a structured prompt, sends it to
//! a locally hosted model and hands back the response for display.
//!
//! Extraction lives in plugin crates (`multiapp-pdf`, `multiapp-web`) that
//! implement the traits in [`extract`]; this crate owns the prompt templates,
//! the completion providers and the [`ModeController`] that ties them together.

pub mod constants;
pub mod controller;
pub mod errors;
pub mod extract;
pub mod output;
pub mod prompts;
pub mod providers;
pub mod types;

pub use controller::{ControllerOptions, ControllerState, ModeController, ModeReport, Source};
pub use errors::{ExtractError, InferenceError, ModeError};
pub use types::{
    ExtractedText, Message, Mode, ModeInput, ModeOutput, Prompt, ProviderConfig, ProviderKind,
    Role,
};
