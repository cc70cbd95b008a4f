//! HTML parsing and paragraph lookup.
//!
//! A thin wrapper over `scraper` exposing only what extraction needs.
//!
//! # Example
//!
//! ```rust
//! use overview_core::parse::Document;
//!
//! let doc = Document::parse("<html><head><title>T</title></head><body><p>One</p><p>Two</p></body></html>");
//! assert_eq!(doc.title(), Some("T".to_string()));
//! assert_eq!(doc.paragraphs().len(), 2);
//! ```

use std::sync::LazyLock;

use scraper::{Html, Selector};

static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").expect("static selector"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").expect("static selector"));

/// A parsed HTML document.
///
/// Parsing never fails: the HTML5 tree builder recovers from malformed
/// markup the same way a browser does.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Gets the content of the `<title>` element, if any.
    pub fn title(&self) -> Option<String> {
        self.html
            .select(&TITLE)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// Every `<p>` element in document order.
    pub fn paragraphs(&'_ self) -> Vec<Element<'_>> {
        self.html.select(&PARAGRAPH).map(|element| Element { element }).collect()
    }
}

/// A single element of a [`Document`].
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl Element<'_> {
    /// Concatenation of all text nodes inside this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head><title> Test Page </title></head>
        <body>
            <h1>Heading</h1>
            <p class="content">Paragraph <b>1</b></p>
            <div><p>Paragraph 2</p></div>
        </body>
        </html>
    "#;

    #[test]
    fn test_title() {
        let doc = Document::parse(SAMPLE_HTML);
        assert_eq!(doc.title(), Some("Test Page".to_string()));
    }

    #[test]
    fn test_paragraphs_in_order_with_nested_text() {
        let doc = Document::parse(SAMPLE_HTML);
        let paragraphs = doc.paragraphs();

        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].text(), "Paragraph 1");
        assert_eq!(paragraphs[1].text(), "Paragraph 2");
    }

    #[test]
    fn test_missing_title() {
        let doc = Document::parse("<p>no head</p>");
        assert_eq!(doc.title(), None);
    }
}
