use super::tasks::*;
use crate::{
    errors::ModeError,
    types::{Mode, Prompt},
};

/// The mode-specific fields a prompt is assembled from.
///
/// Document and web modes carry the already-extracted text, so building a
/// prompt never touches I/O.
#[derive(Debug, Clone, Copy)]
pub enum PromptFields<'a> {
    AssistantQuery { question: &'a str },
    PdfSummary { text: &'a str },
    Translation { text: &'a str, target_language: &'a str },
    PdfQuestion { text: &'a str, question: &'a str },
    CodeGeneration { prompt: &'a str },
    WebQuestion { text: &'a str, question: &'a str },
}

impl PromptFields<'_> {
    pub fn mode(&self) -> Mode {
        match self {
            PromptFields::AssistantQuery { .. } => Mode::AssistantQuery,
            PromptFields::PdfSummary { .. } => Mode::PdfSummary,
            PromptFields::Translation { .. } => Mode::Translation,
            PromptFields::PdfQuestion { .. } => Mode::PdfQuestion,
            PromptFields::CodeGeneration { .. } => Mode::CodeGeneration,
            PromptFields::WebQuestion { .. } => Mode::WebQuestion,
        }
    }
}

/// Builds the prompt for a mode from its fields.
pub fn build_prompt(fields: PromptFields<'_>) -> Prompt {
    match fields {
        PromptFields::AssistantQuery { question } => Prompt::new(
            ASSISTANT_SYSTEM_PROMPT,
            [ASSISTANT_USER_PROMPT.replace("{question}", question)],
        ),
        PromptFields::PdfSummary { text } => Prompt::new(
            SUMMARY_SYSTEM_PROMPT,
            [SUMMARY_USER_PROMPT.replace("{text}", text)],
        ),
        PromptFields::Translation {
            text,
            target_language,
        } => {
            // Substitute the user text last so its contents are never re-scanned.
            let user = TRANSLATION_USER_PROMPT
                .replace("{language}", target_language)
                .replace("{text}", text);
            Prompt::new(TRANSLATION_SYSTEM_PROMPT, [user])
        }
        PromptFields::PdfQuestion { text, question }
        | PromptFields::WebQuestion { text, question } => grounded_question(text, question),
        PromptFields::CodeGeneration { prompt } => Prompt::new(
            CODE_GENERATION_SYSTEM_PROMPT,
            [CODE_GENERATION_USER_PROMPT.replace("{prompt}", prompt)],
        ),
    }
}

/// Context first, question second, always as two separate user turns.
fn grounded_question(text: &str, question: &str) -> Prompt {
    Prompt::new(
        GROUNDED_QA_SYSTEM_PROMPT,
        [
            GROUNDED_QA_CONTEXT_PROMPT.replace("{text}", text),
            GROUNDED_QA_QUESTION_PROMPT.replace("{question}", question),
        ],
    )
}

/// Rejects a required field that is empty or only whitespace.
pub fn require_non_empty<'a>(
    mode: Mode,
    field: &'static str,
    value: &'a str,
) -> Result<&'a str, ModeError> {
    if value.trim().is_empty() {
        return Err(ModeError::Validation { mode, field });
    }
    Ok(value)
}
