//! # Mode Controller
//!
//! Runs one request at a time through Extract → Build → Complete and hands the
//! outcome back to the display layer. Failures are captured in the report and
//! never leave the controller in a busy state.

use crate::{
    constants::{DEFAULT_CODE_LANGUAGE, DEFAULT_SUMMARY_CHAR_LIMIT, RUN_LOG_TARGET},
    errors::ModeError,
    extract::{DocumentExtractor, PageExtractor},
    output::code_output,
    prompts::{build_prompt, require_non_empty, PromptFields},
    providers::ai::CompletionClient,
    types::{ExtractedText, Mode, ModeInput, ModeOutput, Prompt},
};
use tracing::{debug, info, warn};

/// The lifecycle of a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Collecting,
    Extracting,
    BuildingPrompt,
    AwaitingCompletion,
    Displaying,
}

/// Read-only settings applied to every request.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Maximum number of characters of a document sent for summarization.
    pub summary_char_limit: usize,
    /// Language tag attached to generated code.
    pub code_language: String,
    /// Emit run records at `info` instead of `debug`.
    pub trace_runs: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            summary_char_limit: DEFAULT_SUMMARY_CHAR_LIMIT,
            code_language: DEFAULT_CODE_LANGUAGE.to_string(),
            trace_runs: false,
        }
    }
}

/// The outcome of one request, ready to be rendered.
#[derive(Debug)]
pub struct ModeReport {
    pub mode: Mode,
    /// Characters extracted from the document or page, before truncation.
    pub extracted_chars: Option<usize>,
    pub outcome: Result<ModeOutput, ModeError>,
}

/// Where a grounded mode reads its text from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Document(Vec<u8>),
    Page(String),
}

impl Source {
    fn matches_document(&self, document: &[u8]) -> bool {
        matches!(self, Source::Document(bytes) if bytes.as_slice() == document)
    }

    fn matches_page(&self, url: &str) -> bool {
        matches!(self, Source::Page(page) if page == url)
    }
}

/// Dispatches each mode to its extractor and prompt shape.
pub struct ModeController {
    client: Box<dyn CompletionClient>,
    documents: Box<dyn DocumentExtractor>,
    pages: Box<dyn PageExtractor>,
    options: ControllerOptions,
    state: ControllerState,
    /// Text extracted ahead of a request, used once by the next matching run.
    prefetched: Option<(Source, ExtractedText)>,
}

impl ModeController {
    pub fn new(
        client: Box<dyn CompletionClient>,
        documents: Box<dyn DocumentExtractor>,
        pages: Box<dyn PageExtractor>,
        options: ControllerOptions,
    ) -> Self {
        Self {
            client,
            documents,
            pages,
            options,
            state: ControllerState::Idle,
            prefetched: None,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    /// Extracts the text of `source` before the rest of the request is known
    /// and returns its length in characters.
    ///
    /// The next `run` for `mode` with the same document or URL reuses the
    /// text instead of extracting again.
    pub async fn extract_ahead(&mut self, mode: Mode, source: Source) -> Result<usize, ModeError> {
        self.prefetched = None;
        let source = match source {
            Source::Document(document) => {
                require_document(mode, &document)?;
                Source::Document(document)
            }
            Source::Page(url) => {
                let url = require_non_empty(mode, "web link", &url)?.trim().to_string();
                Source::Page(url)
            }
        };

        self.state = ControllerState::Extracting;
        let extracted = match &source {
            Source::Document(document) => self.documents.extract_document(document).await,
            Source::Page(url) => self.pages.extract_page(url).await,
        };
        self.state = ControllerState::Idle;

        let extracted = extracted?;
        info!(
            "[extract_ahead] extracted {} characters for mode '{}'",
            extracted.original_chars,
            mode.id()
        );
        let chars = extracted.original_chars;
        self.prefetched = Some((source, extracted));
        Ok(chars)
    }

    /// Runs one request to completion and returns to `Idle`.
    pub async fn run(&mut self, input: ModeInput) -> ModeReport {
        let mode = input.mode();
        self.state = ControllerState::Collecting;
        info!("[run] mode '{}' started", mode.id());

        let mut extracted_chars = None;
        let outcome = self.execute(input, &mut extracted_chars).await;

        self.state = ControllerState::Displaying;
        match &outcome {
            Ok(output) => self.record_run(mode, output),
            Err(e) => warn!("[run] mode '{}' failed: {e}", mode.id()),
        }
        self.state = ControllerState::Idle;

        ModeReport {
            mode,
            extracted_chars,
            outcome,
        }
    }

    async fn execute(
        &mut self,
        input: ModeInput,
        extracted_chars: &mut Option<usize>,
    ) -> Result<ModeOutput, ModeError> {
        let mode = input.mode();
        match input {
            ModeInput::AssistantQuery { question } => {
                let question = require_non_empty(mode, "question", &question)?;
                let prompt = self.build(PromptFields::AssistantQuery { question });
                self.complete(&prompt).await.map(ModeOutput::Text)
            }
            ModeInput::PdfSummary { document } => {
                require_document(mode, &document)?;
                let extracted = self.extract_document(&document).await?;
                *extracted_chars = Some(extracted.original_chars);
                let extracted = extracted.truncated(self.options.summary_char_limit);
                debug!(
                    "[execute] summarizing {} of {} characters",
                    extracted.char_len(),
                    extracted.original_chars
                );
                let prompt = self.build(PromptFields::PdfSummary {
                    text: &extracted.text,
                });
                self.complete(&prompt).await.map(ModeOutput::Text)
            }
            ModeInput::Translation {
                text,
                target_language,
            } => {
                let text = require_non_empty(mode, "text", &text)?;
                let target_language = require_non_empty(mode, "target language", &target_language)?;
                let prompt = self.build(PromptFields::Translation {
                    text,
                    target_language: target_language.trim(),
                });
                self.complete(&prompt).await.map(ModeOutput::Text)
            }
            ModeInput::PdfQuestion { document, question } => {
                require_document(mode, &document)?;
                let question = require_non_empty(mode, "question", &question)?;
                let extracted = self.extract_document(&document).await?;
                *extracted_chars = Some(extracted.original_chars);
                let prompt = self.build(PromptFields::PdfQuestion {
                    text: &extracted.text,
                    question,
                });
                self.complete(&prompt).await.map(ModeOutput::Text)
            }
            ModeInput::CodeGeneration { prompt } => {
                let request = require_non_empty(mode, "prompt", &prompt)?;
                let prompt = self.build(PromptFields::CodeGeneration { prompt: request });
                let raw = self.complete(&prompt).await?;
                Ok(code_output(&raw, &self.options.code_language))
            }
            ModeInput::WebQuestion { url, question } => {
                let url = require_non_empty(mode, "web link", &url)?;
                let question = require_non_empty(mode, "question", &question)?;
                let extracted = self.extract_page(url.trim()).await?;
                *extracted_chars = Some(extracted.original_chars);
                let prompt = self.build(PromptFields::WebQuestion {
                    text: &extracted.text,
                    question,
                });
                self.complete(&prompt).await.map(ModeOutput::Text)
            }
        }
    }

    async fn extract_document(&mut self, document: &[u8]) -> Result<ExtractedText, ModeError> {
        self.state = ControllerState::Extracting;
        if let Some(extracted) = self.take_prefetched(|source| source.matches_document(document)) {
            return Ok(extracted);
        }
        let extracted = self.documents.extract_document(document).await?;
        info!(
            "[extract_document] extracted {} characters",
            extracted.original_chars
        );
        Ok(extracted)
    }

    async fn extract_page(&mut self, url: &str) -> Result<ExtractedText, ModeError> {
        self.state = ControllerState::Extracting;
        if let Some(extracted) = self.take_prefetched(|source| source.matches_page(url)) {
            return Ok(extracted);
        }
        Ok(self.pages.extract_page(url).await?)
    }

    fn take_prefetched(&mut self, matches: impl Fn(&Source) -> bool) -> Option<ExtractedText> {
        match self.prefetched.take() {
            Some((source, extracted)) if matches(&source) => {
                debug!("[extract] reusing text extracted ahead");
                Some(extracted)
            }
            _ => None,
        }
    }

    fn build(&mut self, fields: PromptFields<'_>) -> Prompt {
        self.state = ControllerState::BuildingPrompt;
        let prompt = build_prompt(fields);
        debug!(prompt = ?prompt.messages(), "[build] prompt assembled");
        prompt
    }

    async fn complete(&mut self, prompt: &Prompt) -> Result<String, ModeError> {
        self.state = ControllerState::AwaitingCompletion;
        let response = self.client.complete(prompt).await?;
        debug!("<-- Completion: {}", response);
        Ok(response)
    }

    fn record_run(&self, mode: Mode, output: &ModeOutput) {
        let response_chars = output.as_str().chars().count();
        if self.options.trace_runs {
            info!(target: RUN_LOG_TARGET, mode = mode.id(), response_chars, "run completed");
        } else {
            debug!(target: RUN_LOG_TARGET, mode = mode.id(), response_chars, "run completed");
        }
    }
}

fn require_document(mode: Mode, document: &[u8]) -> Result<(), ModeError> {
    if document.is_empty() {
        return Err(ModeError::Validation {
            mode,
            field: "document",
        });
    }
    Ok(())
}
