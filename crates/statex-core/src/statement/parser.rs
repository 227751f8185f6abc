//! Three-field income statement extraction.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::statement::{ExtractionResult, Field};
use crate::text::{NormalizedText, RawDocumentText};

use super::rules::{extract_value_with_patterns, pattern_table};

/// Result of extracting one statement.
#[derive(Debug, Clone)]
pub struct StatementExtraction {
    /// Extracted line items.
    pub results: ExtractionResult,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Income statement parser.
///
/// Holds no state; the pattern tables are process-wide and read-only, so one
/// parser can serve any number of documents from any thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct FinancialStatementParser;

impl FinancialStatementParser {
    pub fn new() -> Self {
        Self
    }

    /// Extract every field from normalized text.
    pub fn parse(&self, text: &NormalizedText) -> StatementExtraction {
        let start = Instant::now();

        info!("Parsing statement from {} characters of text", text.len());

        let mut results = ExtractionResult::default();
        for field in Field::ALL {
            let value = extract_value_with_patterns(text, pattern_table(field), field.label());
            results.set(field, value);
        }

        let warnings: Vec<String> = results
            .missing_fields()
            .into_iter()
            .map(|f| format!("Could not extract {}", f.label()))
            .collect();

        debug!(
            "Extracted {} of {} fields",
            Field::ALL.len() - warnings.len(),
            Field::ALL.len()
        );

        StatementExtraction {
            results,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Normalize per-page text and extract every field.
    pub fn parse_document(&self, document: &RawDocumentText) -> StatementExtraction {
        self.parse(&document.normalize())
    }
}

/// Extract revenue, cost of sales, and operating income from raw text.
pub fn extract_financial_values(text: &str) -> ExtractionResult {
    FinancialStatementParser::new()
        .parse(&NormalizedText::new(text))
        .results
}
