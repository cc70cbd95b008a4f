//! Plain-text extraction from paragraph markup.
//!
//! The extractor keeps only `<p>` elements: their text, in document order,
//! joined with newlines. A page with no paragraphs yields an empty string,
//! which is a valid result and not an error.

use serde::Serialize;

use crate::parse::Document;

/// Text extracted from a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedContent {
    /// Paragraph texts joined by `\n`.
    pub text: String,
    /// Number of paragraph elements found.
    pub paragraphs: usize,
    /// Document title, when present.
    pub title: Option<String>,
}

impl ExtractedContent {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Extracts the text of every paragraph element.
///
/// # Example
///
/// ```rust
/// use overview_core::extract_paragraphs;
///
/// let extracted = extract_paragraphs("<p>First</p><div>skipped</div><p>Second</p>");
/// assert_eq!(extracted.text, "First\nSecond");
/// assert_eq!(extracted.paragraphs, 2);
/// ```
pub fn extract_paragraphs(html: &str) -> ExtractedContent {
    let doc = Document::parse(html);
    let texts: Vec<String> = doc.paragraphs().iter().map(|p| p.text()).collect();

    ExtractedContent { paragraphs: texts.len(), text: texts.join("\n"), title: doc.title() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joins_paragraphs_with_newlines() {
        let html = "<html><body><p>a</p><p>b</p><p>c</p></body></html>";
        let extracted = extract_paragraphs(html);
        assert_eq!(extracted.text, "a\nb\nc");
        assert_eq!(extracted.paragraphs, 3);
    }

    #[test]
    fn test_no_paragraphs_is_empty_not_error() {
        let extracted = extract_paragraphs("<html><body><div>only a div</div></body></html>");
        assert!(extracted.is_empty());
        assert_eq!(extracted.paragraphs, 0);
    }

    #[test]
    fn test_empty_paragraphs_still_count() {
        let extracted = extract_paragraphs("<p></p><p>x</p>");
        assert_eq!(extracted.paragraphs, 2);
        assert_eq!(extracted.text, "\nx");
    }

    #[test]
    fn test_ignores_script_and_headings() {
        let html = "<h1>Title</h1><script>var p = 1;</script><p>Body text</p>";
        assert_eq!(extract_paragraphs(html).text, "Body text");
    }

    #[test]
    fn test_title_is_captured() {
        let html = "<html><head><title>Guide</title></head><body><p>x</p></body></html>";
        assert_eq!(extract_paragraphs(html).title.as_deref(), Some("Guide"));
    }
}
