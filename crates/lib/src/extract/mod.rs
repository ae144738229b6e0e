//! # Text Extraction
//!
//! The contracts extractor crates implement. The controller only sees these
//! traits, so document and web sources can be swapped or mocked freely.

use crate::{errors::ExtractError, types::ExtractedText};
use async_trait::async_trait;

/// Turns an uploaded document into plain text.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Returns the visible text of every page, concatenated in page order.
    async fn extract_document(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractError>;
}

/// Turns a web page into plain text.
#[async_trait]
pub trait PageExtractor: Send + Sync {
    /// Fetches `url` and returns the text of its paragraphs joined by single spaces.
    async fn extract_page(&self, url: &str) -> Result<ExtractedText, ExtractError>;
}
