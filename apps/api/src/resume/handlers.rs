use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::parsing::pdf::{normalize_text, MIN_TEXT_LEN};
use crate::parsing::upload::{format_file_size, read_file_field, validate_upload};
use crate::resume::pipeline::{analyze_resume, ResumeAnalysis};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub text: String,
}

/// POST /api/v1/resume/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeAnalysis>, AppError> {
    let file = read_file_field(&mut multipart).await?;
    validate_upload(&file, state.config.max_upload_bytes)?;

    let file_name = file.file_name.as_deref().unwrap_or("<unnamed>").to_string();
    info!(
        "Processing upload {file_name} ({})",
        format_file_size(file.bytes.len())
    );

    let pdf = state.extractor.extract(file.bytes).await.map_err(|e| {
        warn!("Text extraction failed for {file_name}: {e}");
        AppError::DocumentUnreadable(e)
    })?;

    run_pipeline(&state, pdf.text, pdf.num_pages).await
}

/// POST /api/v1/resume/analyze-text
/// Analyzes text that was already extracted client-side. Counted as one page.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeTextRequest>,
) -> Result<Json<ResumeAnalysis>, AppError> {
    let text = normalize_text(&req.text);
    if text.chars().count() < MIN_TEXT_LEN {
        return Err(AppError::Validation(format!(
            "Resume text must contain at least {MIN_TEXT_LEN} characters"
        )));
    }
    run_pipeline(&state, text, 1).await
}

/// The pipeline is CPU-bound regex work, so it runs off the async executor.
async fn run_pipeline(
    state: &AppState,
    text: String,
    num_pages: usize,
) -> Result<Json<ResumeAnalysis>, AppError> {
    let dictionary = state.dictionary.clone();
    let analysis = tokio::task::spawn_blocking(move || analyze_resume(&text, num_pages, &dictionary))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in analysis: {e}")))?;
    Ok(Json(analysis))
}
