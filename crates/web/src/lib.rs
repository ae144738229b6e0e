//! # multiapp-web: Web Page Extraction
//!
//! Fetches a user-supplied URL and reduces the page to its paragraph text,
//! plugging into the `multiapp` controller through the `PageExtractor` trait.

use async_trait::async_trait;
use multiapp::{extract::PageExtractor, ExtractError, ExtractedText};
use reqwest::Client;
use thiserror::Error;
use tracing::{info, instrument, warn};
use url::Url;

// --- Error Definitions ---

#[derive(Error, Debug)]
pub enum WebExtractError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Failed to fetch content: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },
}

impl From<WebExtractError> for ExtractError {
    fn from(err: WebExtractError) -> Self {
        ExtractError::Fetch(err.to_string())
    }
}

// --- Core Fetch Logic ---

/// Parses and checks a user-supplied URL. Only `http` and `https` are fetched.
pub fn parse_web_url(raw: &str) -> Result<Url, WebExtractError> {
    let url = Url::parse(raw.trim()).map_err(|e| WebExtractError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(WebExtractError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

/// Fetches `url` and returns the text of its paragraphs joined by single spaces.
///
/// Network failures and non-success statuses are errors. A body that does not
/// parse as useful markup yields empty text.
pub async fn fetch_page_text(client: &Client, url: &str) -> Result<String, WebExtractError> {
    let url = parse_web_url(url)?;
    info!("Fetching web page: {url}");

    let response = client.get(url.clone()).send().await?;
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(WebExtractError::Status { status, body });
    }

    let body = response.text().await?;
    let text = multiapp_html::paragraph_text(&body);
    if text.is_empty() {
        warn!("No paragraph text found at {url}");
    }
    Ok(text)
}

// --- Extractor Implementation ---

/// The `PageExtractor` implementation for public web pages.
#[derive(Debug, Clone, Default)]
pub struct WebPageExtractor {
    client: Client,
}

impl WebPageExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageExtractor for WebPageExtractor {
    #[instrument(skip(self))]
    async fn extract_page(&self, url: &str) -> Result<ExtractedText, ExtractError> {
        let text = fetch_page_text(&self.client, url).await?;
        Ok(ExtractedText::new(text))
    }
}
