//! # multiapp-html: Paragraph Text Extraction
//!
//! Pulls the readable paragraph text out of an HTML document. Parsing is
//! lenient: malformed markup yields whatever paragraphs the parser recovers,
//! and a document with no `<p>` elements yields an empty string.

use scraper::{Html, Selector};
use tracing::debug;

/// Returns the text of every `<p>` element in document order, joined by a
/// single space.
///
/// Each paragraph contributes the concatenation of all its descendant text
/// nodes, exactly as they appear in the markup.
pub fn paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);
    if !document.errors.is_empty() {
        debug!("HTML parser recovered from {} errors", document.errors.len());
    }

    let Ok(selector) = Selector::parse("p") else {
        return String::new();
    };

    document
        .select(&selector)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_inline_text_is_kept() {
        let html = "<p>Hello <b>bold</b> world</p>";
        assert_eq!(paragraph_text(html), "Hello bold world");
    }
}
