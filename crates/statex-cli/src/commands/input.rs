//! Reading statement documents from disk.

use std::fs;
use std::path::Path;

use tracing::debug;

use statex_core::{extract_document_text, RawDocumentText, StatexConfig};

/// Extensions accepted as statement input.
const SUPPORTED_EXTENSIONS: [&str; 2] = ["pdf", "txt"];

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Whether the file looks like a statement we can read.
pub fn is_supported(path: &Path) -> bool {
    SUPPORTED_EXTENSIONS.contains(&extension_of(path).as_str())
}

/// Read a statement into per-page text.
///
/// PDFs go through the PDF extractor. `.txt` files hold already-extracted
/// text, with form feeds separating pages.
pub fn read_document(path: &Path, config: &StatexConfig) -> anyhow::Result<RawDocumentText> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    match extension_of(path).as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            let document = extract_document_text(&data, &config.pdf)?;
            debug!("Read {} pages from {}", document.page_count(), path.display());
            Ok(document)
        }
        "txt" => {
            let text = fs::read_to_string(path)?;
            Ok(RawDocumentText::from_plain_text(&text))
        }
        other => anyhow::bail!(
            "File must be a PDF (or extracted .txt text), got '{}': {}",
            other,
            path.display()
        ),
    }
}
