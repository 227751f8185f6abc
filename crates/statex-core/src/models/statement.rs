//! Income statement line-item models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An income statement line item the extractor looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Revenue,
    #[serde(rename = "cos")]
    CostOfSales,
    OperatingIncome,
}

impl Field {
    /// All fields, in result order.
    pub const ALL: [Field; 3] = [Field::Revenue, Field::CostOfSales, Field::OperatingIncome];

    /// Key used in the result mapping.
    pub fn key(self) -> &'static str {
        match self {
            Field::Revenue => "revenue",
            Field::CostOfSales => "cos",
            Field::OperatingIncome => "operating_income",
        }
    }

    /// Human-readable label, used in log lines.
    pub fn label(self) -> &'static str {
        match self {
            Field::Revenue => "revenue",
            Field::CostOfSales => "cost of sales",
            Field::OperatingIncome => "operating income",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "revenue" | "revenues" => Ok(Field::Revenue),
            "cos" | "cost_of_sales" | "cost of sales" => Ok(Field::CostOfSales),
            "operating_income" | "operating income" => Ok(Field::OperatingIncome),
            other => Err(format!("unknown field: {}", other)),
        }
    }
}

/// Extracted line-item values.
///
/// Each value is a canonical numeric string (`"1234567"`, `"-200"`) or the
/// empty string when the field was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub revenue: String,
    #[serde(rename = "cos")]
    pub cost_of_sales: String,
    pub operating_income: String,
}

impl ExtractionResult {
    /// Value for a field; empty when not found.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Revenue => &self.revenue,
            Field::CostOfSales => &self.cost_of_sales,
            Field::OperatingIncome => &self.operating_income,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Revenue => self.revenue = value,
            Field::CostOfSales => self.cost_of_sales = value,
            Field::OperatingIncome => self.operating_income = value,
        }
    }

    /// Iterate `(field, value)` pairs in result order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Parsed amount for a field, if found.
    pub fn amount(&self, field: Field) -> Option<Decimal> {
        let value = self.get(field);
        if value.is_empty() {
            return None;
        }
        Decimal::from_str(value).ok()
    }

    /// Fields that resolved to the empty string.
    pub fn missing_fields(&self) -> Vec<Field> {
        self.iter()
            .filter(|(_, v)| v.is_empty())
            .map(|(f, _)| f)
            .collect()
    }
}

/// Render an amount with thousands separators (`-1234567` -> `-1,234,567`).
///
/// Fraction digits are kept at the scale the amount was parsed with.
pub fn format_amount(amount: Decimal) -> String {
    let s = amount.abs().to_string();
    let (integer_part, fraction) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();
    if amount.is_sign_negative() && !amount.is_zero() {
        formatted.push('-');
    }

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    if let Some(fraction) = fraction {
        formatted.push('.');
        formatted.push_str(fraction);
    }

    formatted
}
