//! PDF text extraction.
//!
//! Thin wrapper over `pdf-extract`: the document is consumed whole,
//! page by page, before the analysis request is made — no streaming.
//! Pages are joined with double-newline separators.

use std::path::Path;

use tracing::debug;

use crate::error::AdvisorError;

/// Extract the full text of a PDF file.
///
/// Fails with `Validation` for non-PDF paths and `Extraction` when the
/// file cannot be parsed or holds no extractable text (e.g. a pure scan).
pub fn extract_text(path: &Path) -> Result<String, AdvisorError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => {}
        _ => {
            return Err(AdvisorError::Validation(format!(
                "not a PDF file: {}",
                path.display()
            )))
        }
    }

    let bytes = std::fs::read(path).map_err(|e| {
        AdvisorError::Extraction(format!("failed to read {}: {e}", path.display()))
    })?;
    extract_text_from_bytes(&bytes)
}

/// Extract text from in-memory PDF bytes.
pub fn extract_text_from_bytes(bytes: &[u8]) -> Result<String, AdvisorError> {
    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AdvisorError::Extraction(format!("failed to extract text: {e}")))?;

    let text = join_pages(&raw);
    if text.is_empty() {
        return Err(AdvisorError::Extraction(
            "no extractable text in the document".to_string(),
        ));
    }

    debug!(chars = text.len(), "extracted proposal text");
    Ok(text)
}

/// Normalize raw extractor output into double-newline-separated pages.
///
/// `pdf-extract` inserts form feeds between pages; each page's internal
/// whitespace is collapsed so the model sees running text.
fn join_pages(raw: &str) -> String {
    raw.split('\x0C')
        .map(|page| {
            page.split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
