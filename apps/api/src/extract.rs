//! Text extraction front-end: turns an uploaded file into the plain string
//! the analysis core consumes. The core is agnostic to the container
//! format; everything format-specific stays here.

use crate::errors::AppError;

/// Extracts plain text from an uploaded file, dispatching on the file
/// extension. Failures short-circuit analysis: an upload that yields no
/// text is never scored.
pub fn extract_text(filename: &str, data: &[u8]) -> Result<String, AppError> {
    match extension(filename).as_deref() {
        Some("txt") | Some("text") | Some("md") => String::from_utf8(data.to_vec())
            .map_err(|_| AppError::Extraction(format!("'{filename}' is not valid UTF-8 text"))),
        Some("pdf") => pdf_extract::extract_text_from_mem(data)
            .map_err(|e| AppError::Extraction(format!("failed to read '{filename}': {e}"))),
        Some("docx") => Err(AppError::UnsupportedFormat(
            "DOCX is not supported; export the resume as PDF or plain text".to_string(),
        )),
        Some(other) => Err(AppError::UnsupportedFormat(format!(
            "unsupported file extension '.{other}' (expected .txt or .pdf)"
        ))),
        None => Err(AppError::UnsupportedFormat(format!(
            "'{filename}' has no file extension (expected .txt or .pdf)"
        ))),
    }
}

fn extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
