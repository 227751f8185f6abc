//! Error types for the statex-core library.

use thiserror::Error;

/// Main error type for the statex library.
#[derive(Error, Debug)]
pub enum StatexError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The reporting period end date is not a `YYYY-MM-DD` date.
    #[error("period_end_date must be in YYYY-MM-DD format, got {0:?}")]
    InvalidPeriodEndDate(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The document parsed but carries too little text to scan (image-only scan).
    #[error("no extractable text ({0} characters found)")]
    NoText(usize),
}

/// Result type for the statex library.
pub type Result<T> = std::result::Result<T, StatexError>;
