//! Multipart résumé upload: locating the `file` part and checking it before
//! anything is handed to the PDF decoder.

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;

use crate::errors::AppError;

/// Name of the multipart field carrying the résumé.
pub const FILE_FIELD: &str = "file";

const PDF_CONTENT_TYPE: &str = "application/pdf";
const PDF_MAGIC: &[u8] = b"%PDF-";

const KB: f64 = 1024.0;
const MB: f64 = 1024.0 * 1024.0;

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Reads parts until the `file` field is found. Other fields are skipped.
pub async fn read_file_field(multipart: &mut Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(String::from);
        let content_type = field.content_type().map(String::from);
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok(UploadedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }
    Err(AppError::Validation("No file uploaded".to_string()))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}

/// Checks type and size of an uploaded file.
pub fn validate_upload(file: &UploadedFile, max_bytes: usize) -> Result<(), AppError> {
    if !is_pdf(file.content_type.as_deref(), &file.bytes) {
        return Err(AppError::Validation("Only PDF files are allowed".to_string()));
    }
    if file.bytes.len() > max_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "File size must be less than {}",
            format_file_size(max_bytes)
        )));
    }
    Ok(())
}

/// True when the declared content type is PDF or, failing that, the bytes
/// carry the PDF magic.
pub fn is_pdf(content_type: Option<&str>, head: &[u8]) -> bool {
    let declared = content_type
        .map(|ct| ct.to_ascii_lowercase().starts_with(PDF_CONTENT_TYPE))
        .unwrap_or(false);
    declared || head.starts_with(PDF_MAGIC)
}

/// "512 B", "1.50 KB", "10.00 MB".
pub fn format_file_size(bytes: usize) -> String {
    let size = bytes as f64;
    if size < KB {
        format!("{bytes} B")
    } else if size < MB {
        format!("{:.2} KB", size / KB)
    } else {
        format!("{:.2} MB", size / MB)
    }
}
