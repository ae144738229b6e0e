//! # Prompt Templates
//!
//! Fixed instructions for each mode and the pure functions that turn raw
//! inputs into a structured [`Prompt`](crate::types::Prompt).

pub mod builder;
pub mod tasks;

pub use builder::{build_prompt, require_non_empty, PromptFields};
