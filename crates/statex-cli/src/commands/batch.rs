//! Batch processing command for multiple statement files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::stream::{self, StreamExt};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use statex_core::models::report::parse_period_end_date;
use statex_core::{Field, FinancialStatementParser, StatementReport, StatexConfig};

use super::config::load_config;
use super::extract::{format_report, OutputFormat};
use super::input::{is_supported, read_document};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Reporting period end date applied to every file (YYYY-MM-DD)
    #[arg(short, long)]
    period_end_date: Option<String>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    report: Option<StatementReport>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = Arc::new(load_config(config_path)?);

    if let Some(period) = args.period_end_date.as_deref() {
        parse_period_end_date(period)?;
    }

    // Expand glob pattern
    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported(p))
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Each file runs on a blocking worker; at most `jobs` at a time
    let period = args.period_end_date.clone();
    let mut results: Vec<ProcessResult> = stream::iter(files)
        .map(|path| {
            let config = Arc::clone(&config);
            let period = period.clone();
            async move {
                let file_start = Instant::now();
                let worker_path = path.clone();
                let outcome = tokio::task::spawn_blocking(move || {
                    process_single_file(&worker_path, &config, period.as_deref())
                })
                .await
                .map_err(anyhow::Error::from)
                .and_then(|r| r);

                let processing_time_ms = file_start.elapsed().as_millis() as u64;
                match outcome {
                    Ok(report) => ProcessResult {
                        path,
                        report: Some(report),
                        error: None,
                        processing_time_ms,
                    },
                    Err(e) => ProcessResult {
                        path,
                        report: None,
                        error: Some(e.to_string()),
                        processing_time_ms,
                    },
                }
            }
        })
        .buffer_unordered(args.jobs.max(1))
        .inspect(|_| overall_pb.inc(1))
        .collect()
        .await;

    overall_pb.finish_and_clear();
    results.sort_by(|a, b| a.path.cmp(&b.path));

    for result in &results {
        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                anyhow::bail!("Processing failed for {}: {}", result.path.display(), error_msg);
            }
        }
    }

    let successful: Vec<_> = results.iter().filter(|r| r.report.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    let paths: Vec<&Path> = successful.iter().map(|r| r.path.as_path()).collect();
    let names = output_names(&paths, args.format.extension());

    for (result, output_name) in successful.iter().zip(&names) {
        let Some(report) = &result.report else { continue };
        let content = format_report(report, args.format, false)?;

        match &args.output_dir {
            Some(output_dir) => {
                let output_path = output_dir.join(output_name);

                fs::write(&output_path, content)?;
                debug!("Wrote output to {}", output_path.display());
            }
            None => println!("{}", content.trim_end()),
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(
    path: &Path,
    config: &StatexConfig,
    period_end_date: Option<&str>,
) -> anyhow::Result<StatementReport> {
    let document = read_document(path, config)?;
    let parsed = FinancialStatementParser::new().parse_document(&document);

    Ok(StatementReport::new(
        parsed.results,
        period_end_date,
        &config.report.default_period_end_date,
    )?)
}

/// Output file name per input: `a.json` for `a.pdf`, or `a.pdf.json` when
/// another input shares the stem `a`.
fn output_names(paths: &[&Path], extension: &str) -> Vec<String> {
    let stem = |p: &Path| {
        p.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("statement")
            .to_string()
    };

    let mut stem_counts: HashMap<String, usize> = HashMap::new();
    for path in paths {
        *stem_counts.entry(stem(*path)).or_default() += 1;
    }

    paths
        .iter()
        .map(|path| {
            let key = stem(*path);
            if stem_counts[&key] > 1 {
                let file_name = path.file_name().and_then(|s| s.to_str()).unwrap_or("statement");
                format!("{}.{}", file_name, extension)
            } else {
                format!("{}.{}", key, extension)
            }
        })
        .collect()
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status", "period_end_date"];
    header.extend(Field::ALL.iter().map(|f| f.key()));
    header.extend(["processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let time = result.processing_time_ms.to_string();

        let mut record = vec![filename];
        match &result.report {
            Some(report) => {
                record.push("success");
                record.push(&report.period_end_date);
                record.extend(report.results.iter().map(|(_, value)| value));
                record.push(&time);
                record.push("");
            }
            None => {
                record.push("error");
                record.extend(std::iter::repeat("").take(Field::ALL.len() + 1));
                record.push(&time);
                record.push(result.error.as_deref().unwrap_or(""));
            }
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
