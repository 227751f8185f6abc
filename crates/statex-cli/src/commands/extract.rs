//! Extract command - pull line items from a single statement.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use statex_core::{format_amount, Field, FinancialStatementParser, StatementReport, StatexConfig};

use super::config::load_config;
use super::input::read_document;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF or extracted .txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Reporting period end date (YYYY-MM-DD)
    #[arg(short, long)]
    period_end_date: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    let report = build_report(&args, &config, &pb)?;

    let output = format_report(&report, args.format, args.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Read and extract one document, clearing the spinner whether or not it succeeds.
fn build_report(args: &ExtractArgs, config: &StatexConfig, pb: &ProgressBar) -> anyhow::Result<StatementReport> {
    let report = (|| -> anyhow::Result<StatementReport> {
        pb.set_message("Reading document...");
        let document = read_document(&args.input, config)?;

        pb.set_message("Extracting line items...");
        let parsed = FinancialStatementParser::new().parse_document(&document);
        debug!("Extraction took {}ms", parsed.processing_time_ms);

        Ok(StatementReport::new(
            parsed.results,
            args.period_end_date.as_deref(),
            &config.report.default_period_end_date,
        )?)
    })();

    pb.finish_and_clear();
    report
}

/// Render a report in the requested format.
pub fn format_report(report: &StatementReport, format: OutputFormat, pretty: bool) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Json => Ok(serde_json::to_string(report)?),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_csv(report: &StatementReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["period_end_date"];
    header.extend(Field::ALL.iter().map(|f| f.key()));
    wtr.write_record(&header)?;

    let mut record = vec![report.period_end_date.as_str()];
    record.extend(report.results.iter().map(|(_, value)| value));
    wtr.write_record(&record)?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &StatementReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Period ending: {}\n\n", report.period_end_date));

    for (field, value) in report.results.iter() {
        let shown = match report.results.amount(field) {
            Some(amount) => format_amount(amount),
            None if value.is_empty() => "not found".to_string(),
            // Beyond Decimal's range; show the canonical digits as-is
            None => value.to_string(),
        };
        output.push_str(&format!("  {:<18} {}\n", title(field), shown));
    }

    output
}

fn title(field: Field) -> &'static str {
    match field {
        Field::Revenue => "Revenue:",
        Field::CostOfSales => "Cost of sales:",
        Field::OperatingIncome => "Operating income:",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statex_core::ExtractionResult;

    fn report() -> StatementReport {
        let results = ExtractionResult {
            revenue: "1234567".to_string(),
            cost_of_sales: "800000".to_string(),
            operating_income: String::new(),
        };
        StatementReport::new(results, Some("2024-06-30"), "2024-12-31").unwrap()
    }

    fn args(input: &str) -> ExtractArgs {
        ExtractArgs {
            input: PathBuf::from(input),
            period_end_date: None,
            output: None,
            format: OutputFormat::Json,
            pretty: false,
        }
    }

    #[test]
    fn test_spinner_cleared_when_read_fails() {
        let pb = ProgressBar::hidden();
        let result = build_report(&args("does-not-exist.pdf"), &StatexConfig::default(), &pb);

        assert!(result.is_err());
        assert!(pb.is_finished());
    }

    #[test]
    fn test_format_text_beyond_decimal_range() {
        let mut results = ExtractionResult::default();
        results.set(Field::Revenue, "123456789012345678901234567890".to_string());
        let report = StatementReport::new(results, None, "2024-12-31").unwrap();

        let text = format_report(&report, OutputFormat::Text, false).unwrap();
        assert!(text.contains("123456789012345678901234567890"));
    }

    #[test]
    fn test_format_csv() {
        let csv = format_report(&report(), OutputFormat::Csv, false).unwrap();
        assert_eq!(
            csv,
            "period_end_date,revenue,cos,operating_income\n2024-06-30,1234567,800000,\n"
        );
    }

    #[test]
    fn test_format_text() {
        let text = format_report(&report(), OutputFormat::Text, false).unwrap();
        assert!(text.contains("Period ending: 2024-06-30"));
        assert!(text.contains("1,234,567"));
        assert!(text.contains("not found"));
    }
}
