//! # HTML Crate Integration Tests
//!
//! Verifies paragraph extraction against realistic page structures.

#[cfg(test)]
mod tests {
    use multiapp_html::paragraph_text;

    #[test]
    fn test_paragraphs_joined_in_document_order() {
        let html = "<html><body><p>A</p><div><p>B</p></div></body></html>";
        assert_eq!(paragraph_text(html), "A B");
    }

    #[test]
    fn test_non_paragraph_content_is_ignored() {
        let html_content = r#"
        <html>
            <head>
                <title>Test</title>
                <style>body { color: red; }</style>
                <script>alert("hello");</script>
            </head>
            <body>
                <h1>Hello</h1>
                <p>This is a test.</p>
                <ul><li>Not a paragraph</li></ul>
                <p>Second paragraph.</p>
            </body>
        </html>
        "#;

        assert_eq!(
            paragraph_text(html_content),
            "This is a test. Second paragraph."
        );
    }

    #[test]
    fn test_no_paragraphs_yields_empty_text() {
        let html = "<html><body><h1>Only a heading</h1></body></html>";
        assert_eq!(paragraph_text(html), "");
    }

    #[test]
    fn test_malformed_markup_degrades_gracefully() {
        let html = "<p>Unclosed paragraph<p>Another one</div></span>";
        assert_eq!(paragraph_text(html), "Unclosed paragraph Another one");
    }

    #[test]
    fn test_not_html_at_all() {
        assert_eq!(paragraph_text("{\"json\": true}"), "");
    }

    #[test]
    fn test_entities_are_decoded() {
        let html = "<p>Fish &amp; chips</p>";
        assert_eq!(paragraph_text(html), "Fish & chips");
    }
}
