//! Ordered-pattern search for a single line item.

use regex::{Captures, Regex};
use tracing::{debug, info, trace, warn};

use super::cleaner::clean_financial_value;
use super::patterns::pattern_table;
use super::{ExtractionMatch, FieldExtractor};
use crate::models::statement::Field;

/// Line-item extractor backed by a field's pattern table.
pub struct LineItemExtractor {
    field: Field,
    patterns: &'static [Regex],
}

impl LineItemExtractor {
    /// Create an extractor for a field.
    pub fn new(field: Field) -> Self {
        Self {
            field,
            patterns: pattern_table(field),
        }
    }

    /// Every candidate hit in table order, cleanable or not.
    ///
    /// Within one pattern, hits are in document order. Uncleanable
    /// captures carry `None`.
    pub fn scan(&self, text: &str) -> Vec<ExtractionMatch<Option<String>>> {
        let mut results = Vec::new();

        for (rank, pattern) in self.patterns.iter().enumerate() {
            for caps in pattern.captures_iter(text) {
                results.push(candidate(rank, &caps));
            }
        }

        results
    }
}

impl FieldExtractor for LineItemExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_cleanable(text, self.patterns, self.field.label())
    }
}

/// Try `patterns` in order and return the first cleanable value, or `""`.
///
/// Only the first match of each pattern is considered. When that capture
/// does not clean to a number the next pattern is tried.
pub fn extract_value_with_patterns(text: &str, patterns: &[Regex], label: &str) -> String {
    match first_cleanable(text, patterns, label) {
        Some(found) => {
            info!("Found {}: {}", label, found.value);
            found.value
        }
        None => {
            warn!("Could not find {} in document", label);
            String::new()
        }
    }
}

fn first_cleanable(text: &str, patterns: &[Regex], label: &str) -> Option<ExtractionMatch<String>> {
    for (rank, pattern) in patterns.iter().enumerate() {
        let Some(caps) = pattern.captures(text) else {
            trace!("{}: pattern {} did not match", label, rank);
            continue;
        };

        let hit = candidate(rank, &caps);
        match hit.value {
            Some(value) => {
                debug!("{}: pattern {} matched {:?}", label, rank, hit.source);
                return Some(ExtractionMatch {
                    value,
                    rank: hit.rank,
                    capture: hit.capture,
                    position: hit.position,
                    source: hit.source,
                });
            }
            None => {
                debug!("{}: pattern {} captured uncleanable {:?}", label, rank, hit.capture);
            }
        }
    }

    None
}

fn candidate(rank: usize, caps: &Captures<'_>) -> ExtractionMatch<Option<String>> {
    // Leading groups carry context; the trailing group is the amount.
    let capture = if caps.len() > 1 {
        caps.iter().skip(1).last().flatten().map_or("", |m| m.as_str())
    } else {
        caps.get(0).map_or("", |m| m.as_str())
    };

    let (start, end, source) = caps
        .get(0)
        .map_or((0, 0, ""), |m| (m.start(), m.end(), m.as_str()));

    ExtractionMatch::new(clean_financial_value(capture), rank, capture, source)
        .with_position(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn compile(patterns: &[&str]) -> Vec<Regex> {
        patterns
            .iter()
            .map(|p| Regex::new(&format!("(?i){}", p)).unwrap())
            .collect()
    }

    #[test]
    fn test_extract_value_with_patterns_success() {
        let patterns = compile(&[r"total\s+revenues?\s+\$\s*([0-9,]+)"]);
        let value = extract_value_with_patterns("Total revenues $1,234,567 and other income", &patterns, "revenue");
        assert_eq!(value, "1234567");
    }

    #[test]
    fn test_extract_value_with_patterns_falls_back() {
        let patterns = compile(&[
            r"total\s+revenues?\s+\$\s*([0-9,]+)",
            r"revenue[:\s]*\$?([0-9,]+)",
        ]);
        let value = extract_value_with_patterns("Revenue: $1,234,567", &patterns, "revenue");
        assert_eq!(value, "1234567");
    }

    #[test]
    fn test_extract_value_with_patterns_no_match() {
        let patterns = compile(&[r"revenue[:\s]*\$?([0-9,]+)"]);
        let value = extract_value_with_patterns("No financial data here", &patterns, "revenue");
        assert_eq!(value, "");
    }

    #[test]
    fn test_uncleanable_capture_falls_through() {
        let patterns = compile(&[r"revenue[:\s]*\$?([0-9,]+)", r"net\s+sales\s+([0-9,]+)"]);
        // First pattern captures only "," which is not a number.
        let value = extract_value_with_patterns("Revenue, net sales 2,000", &patterns, "revenue");
        assert_eq!(value, "2000");
    }

    #[test]
    fn test_only_first_match_of_a_pattern_counts() {
        let patterns = compile(&[r"revenue[:\s]*([0-9,]+)"]);
        // First hit is uncleanable; later hits of the same pattern are not tried.
        let value = extract_value_with_patterns("revenue, ... revenue 500", &patterns, "revenue");
        assert_eq!(value, "");
    }

    #[test]
    fn test_last_group_is_the_value() {
        let patterns = compile(&[r"(gross|net)\s+(profit)\s+([0-9,]+)"]);
        let value = extract_value_with_patterns("Net profit 1,000", &patterns, "profit");
        assert_eq!(value, "1000");
    }

    #[test]
    fn test_parenthesized_value_without_prefix() {
        let patterns = compile(&[r"operating\s+loss[:\s]*\$?\(([0-9,]+)\)"]);
        let value = extract_value_with_patterns("Operating loss $(123,456)", &patterns, "operating loss");
        assert_eq!(value, "123456");
    }

    #[test]
    fn test_extractor_reports_rank_and_position() {
        let extractor = LineItemExtractor::new(Field::Revenue);
        let text = "Revenue: $500 Total revenues $1,234,567";
        let found = extractor.extract(text).unwrap();

        assert_eq!(found.value, "1234567");
        assert_eq!(found.rank, 0);
        assert_eq!(found.capture, "1,234,567");
        assert_eq!(found.position, Some((14, text.len())));
    }

    #[test]
    fn test_scan_lists_every_candidate() {
        let extractor = LineItemExtractor::new(Field::OperatingIncome);
        let text = "Income from operations 1,000 Operating income 900 operating income 800";
        let hits = extractor.scan(text);

        let summary: Vec<(usize, Option<String>)> =
            hits.iter().map(|m| (m.rank, m.value.clone())).collect();
        assert_eq!(
            summary,
            vec![
                (0, Some("1000".to_string())),
                (1, Some("900".to_string())),
                (1, Some("800".to_string())),
            ]
        );
    }
}
