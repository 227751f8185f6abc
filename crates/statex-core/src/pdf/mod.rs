//! PDF ingestion: turns an uploaded PDF into per-page text.

mod extractor;

pub use extractor::{check_text, PdfExtractor};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Extract per-page text from the loaded document.
    fn extract_document(&self) -> Result<crate::text::RawDocumentText>;
}

/// Load PDF bytes and extract per-page text using the given settings.
pub fn extract_document_text(
    data: &[u8],
    config: &crate::models::config::PdfConfig,
) -> Result<crate::text::RawDocumentText> {
    let mut extractor = PdfExtractor::new()
        .with_max_pages(config.max_pages)
        .with_min_text_length(config.min_text_length);
    extractor.load(data)?;
    extractor.extract_document()
}
