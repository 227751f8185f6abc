//! Inspect command - show every candidate pattern hit per field.

use std::path::PathBuf;

use clap::Args;
use console::style;

use statex_core::{Field, FieldExtractor, LineItemExtractor};

use super::config::load_config;
use super::input::read_document;

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Input file (PDF or extracted .txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Only inspect this field (revenue, cos, operating_income)
    #[arg(long)]
    field: Option<Field>,

    /// Maximum hits to show per field
    #[arg(short, long, default_value = "5")]
    limit: usize,
}

pub async fn run(args: InspectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let document = read_document(&args.input, &config)?;
    let text = document.normalize();

    println!(
        "{} {} pages, {} characters after normalization",
        style("ℹ").blue(),
        document.page_count(),
        text.len()
    );

    let fields: Vec<Field> = match args.field {
        Some(field) => vec![field],
        None => Field::ALL.to_vec(),
    };

    for field in fields {
        let extractor = LineItemExtractor::new(field);
        let selected = extractor.extract(&text);
        let hits = extractor.scan(&text);

        println!();
        println!("{} ({} candidate hits)", style(field.label()).bold(), hits.len());

        for hit in hits.iter().take(args.limit) {
            let is_selected = selected
                .as_ref()
                .is_some_and(|s| s.rank == hit.rank && s.position == hit.position);
            let marker = if is_selected {
                style("→").green().to_string()
            } else {
                " ".to_string()
            };
            let value = match &hit.value {
                Some(v) => v.clone(),
                None => style("uncleanable").red().to_string(),
            };

            println!(
                "{} [{}] {:?} captured {:?} -> {}",
                marker,
                hit.rank,
                hit.source.trim(),
                hit.capture,
                value
            );
        }

        if hits.len() > args.limit {
            println!("  ... {} more", hits.len() - args.limit);
        }

        match selected {
            Some(found) => println!("  result: {}", style(found.value).green()),
            None => println!("  result: {}", style("not found").yellow()),
        }
    }

    Ok(())
}
