//! Text normalization ahead of pattern scanning.
//!
//! Page text arrives from an ingestion collaborator (PDF extractor or plain
//! text input) as a sequence of per-page strings. The scanner works on one
//! flat string with no line breaks, so line-item labels and their amounts
//! that were split across rows still sit next to each other.

use std::fmt;
use std::ops::Deref;

/// Per-page text of a single document, in document order.
///
/// Pages without extractable text are kept as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDocumentText {
    pages: Vec<String>,
}

impl RawDocumentText {
    /// Create from per-page strings.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
        }
    }

    /// Split already-extracted text into pages on form feeds.
    pub fn from_plain_text(text: &str) -> Self {
        Self::from_pages(text.split('\u{000c}'))
    }

    /// Number of pages, including empty ones.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Count of non-whitespace characters across all pages.
    pub fn meaningful_chars(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| p.chars())
            .filter(|c| !c.is_whitespace())
            .count()
    }

    /// Concatenate pages, each non-empty page followed by a newline.
    pub fn joined(&self) -> String {
        let mut text = String::with_capacity(self.pages.iter().map(|p| p.len() + 1).sum());
        for page in self.pages.iter().filter(|p| !p.is_empty()) {
            text.push_str(page);
            text.push('\n');
        }
        text
    }

    /// Join the pages and normalize the result.
    pub fn normalize(&self) -> NormalizedText {
        NormalizedText::new(&self.joined())
    }
}

/// Document text with every `\n` and `\r` replaced by a single space.
///
/// Case and runs of spaces are preserved; the patterns tolerate irregular
/// whitespace themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Normalize arbitrary text.
    pub fn new(text: &str) -> Self {
        Self(normalize_text(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl Deref for NormalizedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replace line breaks with spaces. Total and pure.
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_joined_pages() {
        let raw = RawDocumentText::from_pages(["Page 1 content", "Page 2 content"]);
        assert_eq!(raw.joined(), "Page 1 content\nPage 2 content\n");
    }

    #[test]
    fn test_empty_pages_contribute_nothing() {
        let raw = RawDocumentText::from_pages(["Total revenues", "", "$1,234"]);
        assert_eq!(raw.page_count(), 3);
        assert_eq!(raw.joined(), "Total revenues\n$1,234\n");
        assert_eq!(raw.normalize().as_str(), "Total revenues $1,234 ");
    }

    #[test]
    fn test_normalize_replaces_line_breaks() {
        let text = normalize_text("Cost of\r\nrevenues\n  $800");
        assert_eq!(text, "Cost of  revenues   $800");
        assert!(!text.contains('\n') && !text.contains('\r'));
    }

    #[test]
    fn test_normalize_preserves_case_and_spacing() {
        assert_eq!(normalize_text("Net   SALES"), "Net   SALES");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(RawDocumentText::default().normalize().as_str(), "");
        assert_eq!(RawDocumentText::from_pages(["", ""]).normalize().as_str(), "");
    }

    #[test]
    fn test_from_plain_text_form_feeds() {
        let raw = RawDocumentText::from_plain_text("page one\u{000c}\u{000c}page three");
        assert_eq!(raw.page_count(), 3);
        assert_eq!(raw.joined(), "page one\npage three\n");
        assert_eq!(raw.meaningful_chars(), 16);
    }
}
