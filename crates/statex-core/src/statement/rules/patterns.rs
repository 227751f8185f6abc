//! Candidate pattern tables for income statement line items.
//!
//! Each table is ordered by priority: qualified labels ("Total revenues")
//! come before generic ones ("revenue") so component sub-lines do not win.
//! The numeric value is always the last capture group.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::statement::Field;

/// Digit run with thousands separators, optionally followed by a
/// parenthesized duplicate, e.g. `1,234` or `1,234(1,234)`.
const AMOUNT: &str = r"([0-9,]+(?:\([0-9,]+\))?)";

/// Currency symbols accepted ahead of an amount.
const CURRENCY: &str = r"[$€£¥]";

fn table(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){}", p)).unwrap())
        .collect()
}

lazy_static! {
    pub static ref REVENUE_PATTERNS: Vec<Regex> = table(&[
        // "Total revenues $ 316,124"
        format!(r"total\s+revenues?[:\s]*(?:{CURRENCY}\s*)?{AMOUNT}"),
        format!(r"consolidated\s+revenues?[:\s]*(?:{CURRENCY}\s*)?{AMOUNT}"),
        format!(r"revenues?[:\s]*(?:{CURRENCY}\s*)?{AMOUNT}"),
        format!(r"net\s+revenues?[:\s]*(?:{CURRENCY}\s*)?{AMOUNT}"),
        format!(r"net\s+sales[:\s]*(?:{CURRENCY}\s*)?{AMOUNT}"),
    ]);

    pub static ref COST_OF_SALES_PATTERNS: Vec<Regex> = table(&[
        // Main cost line at the start of the statement
        format!(r"^\s*cost\s+of\s+revenues?\s+(?:{CURRENCY}\s*)?{AMOUNT}"),
        // First line under the "Costs and expenses:" heading
        format!(r"(costs?\s+and\s+expenses:)\s*cost\s+of\s+revenues?\s+(?:{CURRENCY}\s*)?{AMOUNT}"),
        format!(r"cost\s+of\s+revenues?[:\s]*(?:{CURRENCY}\s*)?{AMOUNT}"),
        format!(r"cost\s+of\s+sales[:\s]*(?:{CURRENCY}\s*)?{AMOUNT}"),
        format!(r"cost\s+of\s+goods\s+sold[:\s]*(?:{CURRENCY}\s*)?{AMOUNT}"),
        format!(r"cost\s+of\s+services[:\s]*(?:{CURRENCY}\s*)?{AMOUNT}"),
    ]);

    pub static ref OPERATING_INCOME_PATTERNS: Vec<Regex> = table(&[
        format!(r"income\s+from\s+operations[:\s]*(?:{CURRENCY}\s*)?{AMOUNT}"),
        format!(r"operating\s+income[:\s]*(?:{CURRENCY}\s*)?{AMOUNT}"),
        format!(r"operating\s+earnings[:\s]*(?:{CURRENCY}\s*)?{AMOUNT}"),
    ]);
}

/// Ordered candidate patterns for a field.
pub fn pattern_table(field: Field) -> &'static [Regex] {
    match field {
        Field::Revenue => REVENUE_PATTERNS.as_slice(),
        Field::CostOfSales => COST_OF_SALES_PATTERNS.as_slice(),
        Field::OperatingIncome => OPERATING_INCOME_PATTERNS.as_slice(),
    }
}
