//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StatexError};
use crate::models::report::parse_period_end_date;

/// Main configuration for the statex pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatexConfig {
    /// PDF ingestion configuration.
    pub pdf: PdfConfig,

    /// Report assembly configuration.
    pub report: ReportConfig,
}

/// PDF ingestion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,

    /// Minimum non-whitespace characters for a document to count as text-based.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            min_text_length: 1,
        }
    }
}

/// Report assembly configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Period end date reported when the caller supplies none (YYYY-MM-DD).
    pub default_period_end_date: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_period_end_date: "2024-12-31".to_string(),
        }
    }
}

impl StatexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| StatexError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| StatexError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        parse_period_end_date(&self.report.default_period_end_date).map_err(|_| {
            StatexError::Config(format!(
                "report.default_period_end_date must be YYYY-MM-DD, got {:?}",
                self.report.default_period_end_date
            ))
        })?;
        Ok(())
    }
}
