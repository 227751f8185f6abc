//! Canonicalization of captured amount literals.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DECIMAL: Regex = Regex::new(r"^([+-]?)([0-9]*)(?:\.([0-9]*))?$").unwrap();
}

fn is_currency_symbol(c: char) -> bool {
    matches!(c, '$' | '€' | '£' | '¥')
}

/// Clean a captured literal into a canonical decimal string.
///
/// `"$ (1,234,567)"` becomes `"-1234567"`. Returns `None` when the literal is
/// not a number after cleaning (empty, `"N/A"`, `"1,234(1,234)"`).
pub fn clean_financial_value(raw: &str) -> Option<String> {
    let stripped: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !is_currency_symbol(*c))
        .collect();

    // Accounting negative: (N) -> -N
    let signed = match stripped.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => format!("-{}", inner),
        None => stripped,
    };

    canonical_decimal(&signed.replace(',', ""))
}

/// Validate a separator-free number and render it canonically: no `+`,
/// no trailing decimal point, a leading `0` before a bare fraction.
fn canonical_decimal(value: &str) -> Option<String> {
    let caps = DECIMAL.captures(value)?;
    let integer_part = caps.get(2).map_or("", |m| m.as_str());
    let fraction = caps.get(3).map_or("", |m| m.as_str());

    if integer_part.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut canonical = String::with_capacity(value.len() + 1);
    if &caps[1] == "-" {
        canonical.push('-');
    }
    canonical.push_str(if integer_part.is_empty() { "0" } else { integer_part });
    if !fraction.is_empty() {
        canonical.push('.');
        canonical.push_str(fraction);
    }

    Some(canonical)
}
