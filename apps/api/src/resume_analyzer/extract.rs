//! Resume text extraction from uploaded PDFs.

use tracing::debug;

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Decides by the file header, not the declared content type: browsers send
/// `application/octet-stream` for some PDFs and anything for renamed files.
pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .map(|start| bytes[start..].starts_with(PDF_MAGIC))
        .unwrap_or(false)
}

/// Extracts and normalises the text of a PDF on the blocking pool.
pub async fn extract_resume_text(bytes: bytes::Bytes) -> Result<String, AppError> {
    // pdf-extract panics on some malformed files; a panicked task is reported as unreadable.
    let raw = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| {
            AppError::UnprocessableEntity(format!("Could not read the uploaded PDF: {e}"))
        })?
        .map_err(|e| {
            AppError::UnprocessableEntity(format!("Could not read the uploaded PDF: {e}"))
        })?;

    let text = normalize_whitespace(&raw);
    debug!("Extracted {} characters of resume text", text.len());

    if text.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "Could not read any text from the uploaded PDF. Scanned images are not supported."
                .to_string(),
        ));
    }
    Ok(text)
}

/// Collapses runs of spaces/tabs inside lines, trims every line and keeps at
/// most one blank line between paragraphs.
pub fn normalize_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut blank_run = 0usize;

    for line in raw.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            blank_run += 1;
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
            if blank_run > 0 {
                out.push('\n');
            }
        }
        blank_run = 0;
        out.push_str(&collapsed);
    }
    out
}
