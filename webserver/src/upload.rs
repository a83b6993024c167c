//! Upload validation gate
//!
//! Checks run in a fixed order and fail fast: filename, extension, size while
//! streaming, emptiness. Extraction runs only after all of them pass; its
//! report is then checked for errors and for a minimum word count.

use std::io::Write;

use axum::extract::multipart::Field;
use shared::{ExtractionReport, ExtractionStatus};
use tempfile::NamedTempFile;

use crate::error::{WebServerError, WebServerResult};

pub const ACCEPTED_EXTENSION: &str = ".pdf";
pub const UNREADABLE_DETAIL: &str =
    "Very little text could be extracted. PDF may be image-based, protected, or corrupted.";

/// Filename of the upload, rejecting missing or blank names
pub fn require_filename(filename: Option<&str>) -> WebServerResult<String> {
    filename
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| WebServerError::BadRequest("No filename provided".to_string()))
}

/// Case-insensitive `.pdf` extension check
pub fn check_extension(filename: &str) -> WebServerResult<()> {
    if filename.to_lowercase().ends_with(ACCEPTED_EXTENSION) {
        Ok(())
    } else {
        Err(WebServerError::BadRequest("Only PDF files are allowed".to_string()))
    }
}

fn too_large(max_bytes: usize) -> WebServerError {
    WebServerError::BadRequest(format!(
        "File too large. Maximum size is {}MB",
        max_bytes / (1024 * 1024)
    ))
}

/// Append `chunk` unless that would push the buffer past `max_bytes`
pub fn append_bounded(buffer: &mut Vec<u8>, chunk: &[u8], max_bytes: usize) -> WebServerResult<()> {
    if buffer.len() + chunk.len() > max_bytes {
        return Err(too_large(max_bytes));
    }
    buffer.extend_from_slice(chunk);
    Ok(())
}

/// Read the file field, enforcing the size ceiling as bytes arrive
pub async fn read_bounded(field: &mut Field<'_>, max_bytes: usize) -> WebServerResult<Vec<u8>> {
    let mut buffer = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| WebServerError::BadRequest(format!("Failed to read upload: {e}")))?
    {
        append_bounded(&mut buffer, &chunk, max_bytes)?;
    }

    if buffer.is_empty() {
        return Err(WebServerError::BadRequest("Empty file uploaded".to_string()));
    }
    Ok(buffer)
}

/// Write the upload to a temporary file that is removed when dropped
pub fn spool(bytes: &[u8]) -> std::io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new().prefix("upload-").suffix(ACCEPTED_EXTENSION).tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}

/// Reject error reports (400) and near-empty extractions (422)
pub fn check_report(report: &ExtractionReport, min_word_count: usize) -> WebServerResult<()> {
    if report.status == ExtractionStatus::Error {
        return Err(WebServerError::BadRequest(report.message.clone()));
    }
    if report.word_count < min_word_count {
        return Err(WebServerError::Unprocessable(UNREADABLE_DETAIL.to_string()));
    }
    Ok(())
}
