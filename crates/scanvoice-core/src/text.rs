//! Recognized pages and their aggregation into one document text.

use std::path::{Path, PathBuf};

/// Recognized text of a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Page index (0-based).
    pub index: usize,
    /// Raw recognized text; may be empty or garbled.
    pub text: String,
}

impl Page {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// A source document and its recognized pages, in page order.
#[derive(Debug, Clone)]
pub struct Document {
    source: PathBuf,
    pages: Vec<Page>,
}

impl Document {
    pub fn new(source: impl Into<PathBuf>, pages: Vec<Page>) -> Self {
        Self {
            source: source.into(),
            pages,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Aggregate all pages into a single text.
    pub fn aggregate(&self) -> AggregatedText {
        AggregatedText::from_pages(&self.pages)
    }
}

/// The text of all pages joined with one page marker per page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AggregatedText {
    text: String,
    page_count: usize,
}

impl AggregatedText {
    /// Join pages in order. Every page, empty or not, contributes its marker.
    pub fn from_pages(pages: &[Page]) -> Self {
        let mut text = String::new();
        for (n, page) in pages.iter().enumerate() {
            text.push('\n');
            text.push_str(&page_marker(n + 1));
            text.push('\n');
            text.push_str(&page.text);
        }

        Self {
            text,
            page_count: pages.len(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Marker inserted before the text of page `n` (1-based).
pub fn page_marker(n: usize) -> String {
    format!("--- Page {} ---", n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let aggregated = AggregatedText::from_pages(&[]);
        assert!(aggregated.is_empty());
        assert_eq!(aggregated.page_count(), 0);
    }

    #[test]
    fn test_markers_in_page_order() {
        let pages = vec![Page::new(0, "first"), Page::new(1, ""), Page::new(2, "third")];
        let aggregated = AggregatedText::from_pages(&pages);

        assert_eq!(
            aggregated.as_str(),
            "\n--- Page 1 ---\nfirst\n--- Page 2 ---\n\n--- Page 3 ---\nthird"
        );
        assert_eq!(aggregated.as_str().matches("--- Page ").count(), 3);
    }

    #[test]
    fn test_document_aggregate() {
        let doc = Document::new("inv.pdf", vec![Page::new(0, "Total: 10.00")]);
        assert_eq!(doc.aggregate().page_count(), 1);
        assert_eq!(doc.source(), Path::new("inv.pdf"));
    }
}
