//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::{PdfProcessor, Result};
use crate::error::PdfError;
use crate::text::RawDocumentText;

/// PDF text extractor using lopdf for structure and pdf-extract for text.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    /// Maximum pages to read (0 = unlimited).
    max_pages: usize,
    /// Minimum non-whitespace characters for the document to count as text.
    min_text_length: usize,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            max_pages: 0,
            min_text_length: 1,
        }
    }

    /// Limit the number of pages read (0 = unlimited).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set the minimum amount of text required.
    pub fn with_min_text_length(mut self, min_text_length: usize) -> Self {
        self.min_text_length = min_text_length;
        self
    }

    fn extract_pages(&self) -> Result<Vec<String>> {
        pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    /// Extract per-page text from the loaded document.
    ///
    /// Fails with [`PdfError::NoText`] when the pages carry less text than
    /// the configured minimum (typically a scanned, image-only document).
    fn extract_document(&self) -> Result<RawDocumentText> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }

        let mut pages = self.extract_pages()?;
        if self.max_pages > 0 && pages.len() > self.max_pages {
            debug!("Reading {} of {} pages", self.max_pages, pages.len());
            pages.truncate(self.max_pages);
        }

        let document = RawDocumentText::from_pages(pages);
        check_text(&document, self.min_text_length)?;

        debug!(
            "Extracted {} pages, {} characters of text",
            document.page_count(),
            document.meaningful_chars()
        );

        Ok(document)
    }
}

/// Reject documents whose pages carry fewer than `min_text_length`
/// non-whitespace characters.
pub fn check_text(document: &RawDocumentText, min_text_length: usize) -> Result<()> {
    let chars = document.meaningful_chars();
    if chars < min_text_length {
        return Err(PdfError::NoText(chars));
    }
    Ok(())
}
