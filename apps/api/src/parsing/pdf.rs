//! PDF-to-text: the only step of the pipeline that can fail on user input.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>` so handlers never touch the
//! decoder directly and tests can swap in canned text.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use thiserror::Error;

/// Normalized text shorter than this is treated as "no extractable text".
pub const MIN_TEXT_LEN: usize = 10;

const FORM_FEED: char = '\x0C';

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+").expect("line break regex is valid"));

#[derive(Debug, Error)]
pub enum PdfError {
    /// The decoder rejected the document: corrupted, encrypted or malformed.
    #[error("could not read PDF: {0}")]
    Unreadable(String),

    #[error("no extractable text found in document")]
    Empty,
}

/// Extracted, normalized document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfText {
    pub text: String,
    pub num_pages: usize,
}

impl PdfText {
    /// Normalizes raw decoder output and counts its pages.
    pub fn from_raw(raw: &str) -> Result<Self, PdfError> {
        let text = normalize_text(raw);
        if text.chars().count() < MIN_TEXT_LEN {
            return Err(PdfError::Empty);
        }
        Ok(PdfText {
            text,
            num_pages: count_pages(raw),
        })
    }
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, bytes: Vec<u8>) -> Result<PdfText, PdfError>;
}

/// Default extractor backed by `pdf-extract`.
pub struct PdfExtractor;

#[async_trait]
impl TextExtractor for PdfExtractor {
    async fn extract(&self, bytes: Vec<u8>) -> Result<PdfText, PdfError> {
        // Decoding is CPU-bound and pdf-extract panics on some malformed
        // inputs; a panic surfaces here as a JoinError.
        let raw = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| PdfError::Unreadable(format!("decoder aborted: {e}")))?
        .map_err(PdfError::Unreadable)?;

        PdfText::from_raw(&raw)
    }
}

/// Collapses every run of line breaks to a single `\n` and trims the ends.
pub fn normalize_text(raw: &str) -> String {
    LINE_BREAKS.replace_all(raw, "\n").trim().to_string()
}

/// pdf-extract separates pages with form feeds. Blank pages are not counted.
fn count_pages(raw: &str) -> usize {
    raw.split(FORM_FEED)
        .filter(|page| !page.trim().is_empty())
        .count()
        .max(1)
}
