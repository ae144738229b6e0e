use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// --- Modes ---

/// The canned workflows the application offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    AssistantQuery,
    PdfSummary,
    Translation,
    PdfQuestion,
    CodeGeneration,
    WebQuestion,
}

impl Mode {
    /// Every mode, in menu order.
    pub const ALL: [Mode; 6] = [
        Mode::AssistantQuery,
        Mode::PdfSummary,
        Mode::Translation,
        Mode::PdfQuestion,
        Mode::CodeGeneration,
        Mode::WebQuestion,
    ];

    /// The label shown in the mode selector.
    pub fn label(self) -> &'static str {
        match self {
            Mode::AssistantQuery => "AI Assistant",
            Mode::PdfSummary => "PDF Summarizer",
            Mode::Translation => "Language Translator",
            Mode::PdfQuestion => "Ask Questions from PDF",
            Mode::CodeGeneration => "Code Generator",
            Mode::WebQuestion => "Ask Question for Web Link",
        }
    }

    /// The short identifier used on the command line and in logs.
    pub fn id(self) -> &'static str {
        match self {
            Mode::AssistantQuery => "assistant",
            Mode::PdfSummary => "pdf-summary",
            Mode::Translation => "translate",
            Mode::PdfQuestion => "pdf-question",
            Mode::CodeGeneration => "code",
            Mode::WebQuestion => "web-question",
        }
    }

    /// Whether the mode reads an uploaded document.
    pub fn needs_document(self) -> bool {
        matches!(self, Mode::PdfSummary | Mode::PdfQuestion)
    }

    /// Whether the mode fetches a web page.
    pub fn needs_url(self) -> bool {
        matches!(self, Mode::WebQuestion)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Mode::ALL
            .into_iter()
            .find(|m| m.id().eq_ignore_ascii_case(needle) || m.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("Unknown mode: '{needle}'"))
    }
}

/// The raw inputs collected for one request, tagged by mode.
#[derive(Debug, Clone)]
pub enum ModeInput {
    AssistantQuery {
        question: String,
    },
    PdfSummary {
        document: Vec<u8>,
    },
    Translation {
        text: String,
        target_language: String,
    },
    PdfQuestion {
        document: Vec<u8>,
        question: String,
    },
    CodeGeneration {
        prompt: String,
    },
    WebQuestion {
        url: String,
        question: String,
    },
}

impl ModeInput {
    pub fn mode(&self) -> Mode {
        match self {
            ModeInput::AssistantQuery { .. } => Mode::AssistantQuery,
            ModeInput::PdfSummary { .. } => Mode::PdfSummary,
            ModeInput::Translation { .. } => Mode::Translation,
            ModeInput::PdfQuestion { .. } => Mode::PdfQuestion,
            ModeInput::CodeGeneration { .. } => Mode::CodeGeneration,
            ModeInput::WebQuestion { .. } => Mode::WebQuestion,
        }
    }
}

/// What gets rendered for a successful request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeOutput {
    Text(String),
    Code { language: String, code: String },
}

impl ModeOutput {
    /// The raw model response, regardless of how it is rendered.
    pub fn as_str(&self) -> &str {
        match self {
            ModeOutput::Text(text) => text,
            ModeOutput::Code { code, .. } => code,
        }
    }
}

// --- Extraction ---

/// Plain text pulled out of a document or web page.
///
/// `original_chars` records the length before any truncation so the UI can
/// report how much was extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub original_chars: usize,
}

impl ExtractedText {
    pub fn new(text: String) -> Self {
        let original_chars = text.chars().count();
        Self {
            text,
            original_chars,
        }
    }

    /// Keeps at most `limit` characters, never splitting a UTF-8 sequence.
    pub fn truncated(mut self, limit: usize) -> Self {
        if let Some((byte_idx, _)) = self.text.char_indices().nth(limit) {
            self.text.truncate(byte_idx);
        }
        self
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

// --- Prompts ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// An ordered list of role-tagged messages. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    messages: Vec<Message>,
}

impl Prompt {
    /// Creates a prompt from a system instruction followed by user turns.
    pub fn new<I, S>(system: &str, user_turns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut messages = vec![Message {
            role: Role::System,
            content: system.to_string(),
        }];
        messages.extend(user_turns.into_iter().map(|content| Message {
            role: Role::User,
            content: content.into(),
        }));
        Self { messages }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn system(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
    }

    pub fn user_turns(&self) -> impl Iterator<Item = &str> {
        self.messages
            .iter()
            .filter(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}

// --- Provider configuration ---

/// The kind of LLM backend to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Ollama's native chat API.
    #[default]
    Ollama,
    /// Any OpenAI-compatible `chat/completions` endpoint.
    Local,
}

/// A reusable configuration for a specific AI provider instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub provider: ProviderKind,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// The API key, which can be null for local providers.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model_name")]
    pub model_name: String,
    #[serde(default)]
    pub temperature: Option<f32>,
}

fn default_api_url() -> String {
    crate::constants::DEFAULT_OLLAMA_URL.to_string()
}

fn default_model_name() -> String {
    crate::constants::DEFAULT_MODEL.to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            api_url: default_api_url(),
            api_key: None,
            model_name: default_model_name(),
            temperature: None,
        }
    }
}
