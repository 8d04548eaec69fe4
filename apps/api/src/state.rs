use std::sync::Arc;

use crate::config::Config;
use crate::keywords::dictionary::KeywordDictionary;
use crate::parsing::pdf::TextExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built once at startup; every request reads it by reference.
    pub dictionary: Arc<KeywordDictionary>,
    /// Pluggable PDF-to-text backend. Default: PdfExtractor.
    pub extractor: Arc<dyn TextExtractor>,
}
