//! PDF text extraction backed by `pdf-extract`
//!
//! `pdf-extract` returns the whole document as one string with form feeds
//! between pages; pages are counted from those separators. Image-only
//! (scanned) pages yield no text, which the upload gate rejects by word
//! count.

use std::path::Path;

use shared::{Component, ExtractionReport, ExtractionStatus, component_warn};
use tokio_util::sync::CancellationToken;

use crate::error::{AgentError, AgentResult};
use crate::traits::DocumentExtractor;

pub const TEXT_LAYER_METHOD: &str = "text_layer";
const PAGE_BREAK: char = '\x0C';

/// Extracts the embedded text layer of a PDF
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

fn checkpoint(cancel: &CancellationToken) -> AgentResult<()> {
    if cancel.is_cancelled() {
        return Err(AgentError::Cancelled);
    }
    Ok(())
}

impl DocumentExtractor for PdfTextExtractor {
    fn extract(&self, path: &Path, cancel: &CancellationToken) -> AgentResult<ExtractionReport> {
        checkpoint(cancel)?;
        let bytes = std::fs::read(path)?;

        checkpoint(cancel)?;
        let raw = match pdf_extract::extract_text_from_mem(&bytes) {
            Ok(raw) => raw,
            Err(e) => {
                component_warn!(Component::Agents, path = %path.display(), error = %e, "⚠️ PDF text extraction failed");
                return Ok(ExtractionReport::failed(format!("Could not read PDF: {e}")));
            }
        };

        checkpoint(cancel)?;
        Ok(report_from_text(&raw))
    }
}

/// Build a report from raw extracted text with form-feed page separators
pub fn report_from_text(raw: &str) -> ExtractionReport {
    let pages: Vec<&str> = raw.split(PAGE_BREAK).collect();
    // A trailing separator does not start another page
    let page_count = match pages.last() {
        Some(last) if pages.len() > 1 && last.trim().is_empty() => pages.len() - 1,
        _ => pages.len(),
    };

    let text = pages
        .iter()
        .map(|page| page.trim())
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    let word_count = text.split_whitespace().count();

    ExtractionReport {
        status: ExtractionStatus::Success,
        message: format!("Extracted {word_count} words from {page_count} pages"),
        text,
        word_count,
        page_count,
        methods_used: vec![TEXT_LAYER_METHOD.to_string()],
    }
}
