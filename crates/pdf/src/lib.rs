//! # multiapp-pdf: PDF Text Extraction
//!
//! This crate pulls the visible text out of PDF documents and plugs into the
//! `multiapp` controller through the `DocumentExtractor` trait.

use async_trait::async_trait;
use multiapp::{extract::DocumentExtractor, ExtractError, ExtractedText};
use pdf::content::{Op, TextDrawAdjusted};
use pdf::file::FileOptions;
use thiserror::Error;
use tracing::{info, instrument, warn};

// --- Error Definitions ---

#[derive(Error, Debug)]
pub enum PdfExtractError {
    #[error("Failed to parse PDF content: {0}")]
    PdfParse(String),
    #[error("PDF extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<PdfExtractError> for ExtractError {
    fn from(err: PdfExtractError) -> Self {
        ExtractError::DocumentParse(err.to_string())
    }
}

// --- Core Extraction Logic ---

/// A `TJ` adjustment more negative than this (in thousandths of text space)
/// is read as a word gap.
const WORD_GAP_THRESHOLD: f32 = -200.0;

/// Extracts text from all pages of a PDF synchronously.
///
/// Page texts are concatenated in page order with nothing inserted between
/// them. Within a page, moving to a new line (`T*`, `Td`, `TD`, `Tm`) becomes
/// a newline and wide `TJ` gaps become spaces.
pub fn extract_text_from_pdf(pdf_data: &[u8]) -> Result<String, PdfExtractError> {
    let file = FileOptions::cached()
        .load(pdf_data)
        .map_err(|e| PdfExtractError::PdfParse(e.to_string()))?;
    let resolver = file.resolver();
    let mut full_text = String::new();

    for page_num in 0..file.num_pages() {
        let page = file
            .get_page(page_num)
            .map_err(|e| PdfExtractError::PdfParse(e.to_string()))?;
        if let Some(content) = &page.contents {
            let operations = content
                .operations(&resolver)
                .map_err(|e| PdfExtractError::PdfParse(e.to_string()))?;
            full_text.push_str(&page_text(&operations));
        }
    }
    Ok(full_text)
}

fn page_text(operations: &[Op]) -> String {
    let mut text = String::new();
    for op in operations {
        match op {
            Op::TextDraw { text: drawn } => text.push_str(&drawn.to_string_lossy()),
            Op::TextDrawAdjusted { array } => {
                for item in array {
                    match item {
                        TextDrawAdjusted::Text(drawn) => text.push_str(&drawn.to_string_lossy()),
                        TextDrawAdjusted::Spacing(gap) if *gap < WORD_GAP_THRESHOLD => {
                            if !text.is_empty() && !text.ends_with(char::is_whitespace) {
                                text.push(' ');
                            }
                        }
                        TextDrawAdjusted::Spacing(_) => {}
                    }
                }
            }
            Op::TextNewline => text.push('\n'),
            Op::MoveTextPosition { .. } | Op::SetTextMatrix { .. } => {
                // Positioning before the first run on the page is not a line break.
                if !text.is_empty() && !text.ends_with('\n') {
                    text.push('\n');
                }
            }
            _ => {}
        }
    }
    text
}

// --- Extractor Implementation ---

/// The `DocumentExtractor` implementation for PDF files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    #[instrument(skip(self, bytes), fields(bytes = bytes.len()))]
    async fn extract_document(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractError> {
        let data = bytes.to_vec();
        // Parsing is CPU bound; keep it off the async worker.
        let text = tokio::task::spawn_blocking(move || extract_text_from_pdf(&data))
            .await
            .map_err(PdfExtractError::from)??;

        if text.trim().is_empty() {
            warn!("PDF contained no extractable text.");
        } else {
            info!("Extracted {} characters from PDF.", text.chars().count());
        }
        Ok(ExtractedText::new(text))
    }
}
