//! Income statement line-item extraction.

mod parser;
pub mod rules;

pub use parser::{extract_financial_values, FinancialStatementParser, StatementExtraction};
