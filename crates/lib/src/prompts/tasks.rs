//! # Default Task Prompts
//!
//! The system instructions and user-turn templates for every mode.

// --- AI Assistant ---
pub const ASSISTANT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Please respond to the user queries";
pub const ASSISTANT_USER_PROMPT: &str = "Question:{question}";

// --- PDF Summarizer ---
pub const SUMMARY_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Please summarize the following text.";
pub const SUMMARY_USER_PROMPT: &str = "Text: {text}";

// --- Language Translator ---
pub const TRANSLATION_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Please translate the following text.";
pub const TRANSLATION_USER_PROMPT: &str = "Text: {text} to {language}";

// --- Question answering over a document or web page ---
pub const GROUNDED_QA_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Please answer the following question based on the provided text.";
pub const GROUNDED_QA_CONTEXT_PROMPT: &str = "Text: {text}";
pub const GROUNDED_QA_QUESTION_PROMPT: &str = "Question: {question}";

// --- Code Generator ---
pub const CODE_GENERATION_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Please generate code based on the following prompt.";
pub const CODE_GENERATION_USER_PROMPT: &str = "Prompt: {prompt}";
