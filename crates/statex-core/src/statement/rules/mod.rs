//! Rule-based extractors for income statement line items.

pub mod cleaner;
pub mod line_items;
pub mod patterns;

pub use cleaner::clean_financial_value;
pub use line_items::{extract_value_with_patterns, LineItemExtractor};
pub use patterns::{
    pattern_table, COST_OF_SALES_PATTERNS, OPERATING_INCOME_PATTERNS, REVENUE_PATTERNS,
};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

/// A pattern hit with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Index of the candidate pattern in its table (0 = highest priority).
    pub rank: usize,
    /// Captured literal before cleaning.
    pub capture: String,
    /// Byte span of the whole match in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rank: usize, capture: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            value,
            rank,
            capture: capture.into(),
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
