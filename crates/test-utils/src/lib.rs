use async_trait::async_trait;
use multiapp::{
    extract::{DocumentExtractor, PageExtractor},
    providers::ai::CompletionClient,
    ExtractError, ExtractedText, InferenceError, Prompt,
};
use std::sync::{Arc, Mutex, Once};

static INIT: Once = Once::new();

/// Initializes tracing for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// --- Mock Completion Client ---

/// Records every prompt it receives and answers with a canned response.
#[derive(Clone, Debug)]
pub struct MockCompletionClient {
    response: Arc<Mutex<Result<String, String>>>,
    calls: Arc<Mutex<Vec<Prompt>>>,
}

impl MockCompletionClient {
    /// A client that always answers with `response`.
    pub fn new(response: &str) -> Self {
        Self {
            response: Arc::new(Mutex::new(Ok(response.to_string()))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A client whose backend is always "down".
    pub fn failing(message: &str) -> Self {
        Self {
            response: Arc::new(Mutex::new(Err(message.to_string()))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Changes the canned response for subsequent calls.
    pub fn respond_with(&self, response: &str) {
        *self.response.lock().unwrap() = Ok(response.to_string());
    }

    /// Retrieves the recorded prompts for assertion.
    pub fn get_calls(&self) -> Vec<Prompt> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, prompt: &Prompt) -> Result<String, InferenceError> {
        self.calls.lock().unwrap().push(prompt.clone());
        match &*self.response.lock().unwrap() {
            Ok(response) => Ok(response.clone()),
            Err(body) => Err(InferenceError::AiApi {
                status: 503,
                body: body.clone(),
            }),
        }
    }
}

// --- Mock Extractors ---

/// A document extractor returning fixed text, or a parse error.
#[derive(Clone, Debug)]
pub struct MockDocumentExtractor {
    text: Result<String, String>,
    calls: Arc<Mutex<usize>>,
}

impl MockDocumentExtractor {
    pub fn new(text: &str) -> Self {
        Self {
            text: Ok(text.to_string()),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            text: Err(message.to_string()),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl DocumentExtractor for MockDocumentExtractor {
    async fn extract_document(&self, _bytes: &[u8]) -> Result<ExtractedText, ExtractError> {
        *self.calls.lock().unwrap() += 1;
        self.text
            .clone()
            .map(ExtractedText::new)
            .map_err(ExtractError::DocumentParse)
    }
}

/// A page extractor returning fixed text, or a fetch error.
#[derive(Clone, Debug)]
pub struct MockPageExtractor {
    text: Result<String, String>,
    urls: Arc<Mutex<Vec<String>>>,
}

impl MockPageExtractor {
    pub fn new(text: &str) -> Self {
        Self {
            text: Ok(text.to_string()),
            urls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            text: Err(message.to_string()),
            urls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageExtractor for MockPageExtractor {
    async fn extract_page(&self, url: &str) -> Result<ExtractedText, ExtractError> {
        self.urls.lock().unwrap().push(url.to_string());
        self.text
            .clone()
            .map(ExtractedText::new)
            .map_err(ExtractError::Fetch)
    }
}

// --- Test-Specific Helpers ---
pub mod helpers {
    use anyhow::Result;
    use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

    /// Generates a single-page PDF showing `text` in Helvetica.
    pub fn generate_test_pdf(text: &str) -> Result<Vec<u8>> {
        generate_multi_page_pdf(&[text])
    }

    /// Generates a PDF with one page per entry, each showing that entry's text.
    pub fn generate_multi_page_pdf(pages: &[&str]) -> Result<Vec<u8>> {
        if pages.is_empty() {
            anyhow::bail!("a PDF needs at least one page");
        }

        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        let font_id = Ref::new(3);
        let font_name = Name(b"F1");

        let page_ids: Vec<(Ref, Ref)> = (0..pages.len() as i32)
            .map(|i| (Ref::new(4 + 2 * i), Ref::new(5 + 2 * i)))
            .collect();

        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id)
            .kids(page_ids.iter().map(|(page_id, _)| *page_id))
            .count(pages.len() as i32);

        for (text, (page_id, content_id)) in pages.iter().zip(&page_ids) {
            let mut page = pdf.page(*page_id);
            page.media_box(Rect::new(0.0, 0.0, 595.0, 842.0));
            page.parent(page_tree_id);
            page.contents(*content_id);
            page.resources().fonts().pair(font_name, font_id);
            page.finish();

            let mut content = Content::new();
            content.begin_text();
            content.set_font(font_name, 14.0);
            content.next_line(108.0, 734.0);
            content.show(Str(text.as_bytes()));
            content.end_text();
            pdf.stream(*content_id, &content.finish());
        }

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Ok(pdf.finish())
    }
}
