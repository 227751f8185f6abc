//! Core library for income statement extraction.
//!
//! This crate provides:
//! - PDF ingestion (per-page text extraction)
//! - Text normalization for pattern scanning
//! - Line-item extraction (revenue, cost of sales, operating income)
//!   through ordered pattern tables and a value cleaner
//! - A report envelope pairing results with a reporting period

pub mod error;
pub mod models;
pub mod pdf;
pub mod statement;
pub mod text;

pub use error::{PdfError, Result, StatexError};
pub use models::config::StatexConfig;
pub use models::report::StatementReport;
pub use models::statement::{format_amount, ExtractionResult, Field};
pub use pdf::{extract_document_text, PdfExtractor, PdfProcessor};
pub use statement::rules::{clean_financial_value, FieldExtractor, LineItemExtractor};
pub use statement::{extract_financial_values, FinancialStatementParser, StatementExtraction};
pub use text::{normalize_text, NormalizedText, RawDocumentText};
