//! Response envelope pairing extracted values with a reporting period.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StatexError};
use crate::models::statement::ExtractionResult;

const PERIOD_FORMAT: &str = "%Y-%m-%d";

/// Extraction results for one statement plus the period they describe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementReport {
    /// Period end date, `YYYY-MM-DD`.
    pub period_end_date: String,
    pub results: ExtractionResult,
}

impl StatementReport {
    /// Build a report, validating a caller-supplied period or falling back to `default_period`.
    ///
    /// An empty `period_end_date` counts as not supplied. A valid date is kept
    /// exactly as written.
    pub fn new(
        results: ExtractionResult,
        period_end_date: Option<&str>,
        default_period: &str,
    ) -> Result<Self> {
        let period = match period_end_date.filter(|p| !p.trim().is_empty()) {
            Some(p) => p,
            None => default_period,
        };
        parse_period_end_date(period)?;

        Ok(Self {
            period_end_date: period.to_string(),
            results,
        })
    }
}

/// Parse a `YYYY-MM-DD` period end date.
pub fn parse_period_end_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, PERIOD_FORMAT)
        .map_err(|_| StatexError::InvalidPeriodEndDate(value.to_string()))
}
