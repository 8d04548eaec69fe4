pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::resume::handlers;
use crate::state::AppState;

/// Headroom above the upload limit for multipart framing, so an oversized
/// file reaches the handler and gets the friendly size message.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resume/extract", post(handlers::handle_extract))
        .route(
            "/api/v1/resume/analyze-text",
            post(handlers::handle_analyze_text),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::keywords::dictionary::KeywordDictionary;
    use crate::parsing::pdf::{PdfError, PdfText, TextExtractor};

    const BOUNDARY: &str = "resume-test-boundary";

    const RESUME_TEXT: &str = "Jane Doe\x0C\njane@example.com\n\nWork Experience\n\
        Senior Engineer at Acme Corp\nJan 2020 - Present\nBuilt APIs using Python and React.\x0C\n\
        Projects\nTaskTracker | React, Node.js\n• Built a task manager";

    /// Returns canned text (or a failure) instead of decoding the upload.
    enum StubExtractor {
        Text(&'static str),
        Fail,
    }

    #[async_trait]
    impl TextExtractor for StubExtractor {
        async fn extract(&self, _bytes: Vec<u8>) -> Result<PdfText, PdfError> {
            match self {
                StubExtractor::Text(raw) => PdfText::from_raw(raw),
                StubExtractor::Fail => Err(PdfError::Unreadable("encrypted document".to_string())),
            }
        }
    }

    fn app_with(extractor: StubExtractor, max_upload_bytes: usize) -> Router {
        build_router(AppState {
            config: Config {
                max_upload_bytes,
                ..Config::default()
            },
            dictionary: Arc::new(KeywordDictionary::builtin()),
            extractor: Arc::new(extractor),
        })
    }

    fn app() -> Router {
        app_with(StubExtractor::Text(RESUME_TEXT), 1024 * 1024)
    }

    fn upload_request(field: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"resume.pdf\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/v1/resume/extract")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn text_request(text: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/resume/analyze-text")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::json!({ "text": text }).to_string()))
            .unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, json) = send(app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_unbounded_upload_limit_does_not_overflow() {
        let app = app_with(StubExtractor::Text(RESUME_TEXT), usize::MAX);
        let (status, json) = send(app, upload_request("file", "application/pdf", b"%PDF-1.4")).await;
        assert_eq!(status, StatusCode::OK, "body: {json}");
        assert_eq!(json["success"], true);
    }

    #[tokio::test]
    async fn test_extract_runs_pipeline() {
        let (status, json) = send(app(), upload_request("file", "application/pdf", b"%PDF-1.4")).await;
        assert_eq!(status, StatusCode::OK, "body: {json}");
        assert_eq!(json["success"], true);
        assert_eq!(json["stats"]["pages"], 3);
        assert_eq!(json["experience"]["entries"][0]["company"], "Acme Corp");
        assert_eq!(json["projects"]["entries"][0]["name"], "TaskTracker");
        assert!(json["data"]["programming_languages"]
            .as_array()
            .unwrap()
            .contains(&Value::from("python")));
    }

    #[tokio::test]
    async fn test_magic_bytes_accept_misreported_type() {
        let (status, _) = send(
            app(),
            upload_request("file", "application/octet-stream", b"%PDF-1.7"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_pdf_rejected() {
        let (status, json) = send(app(), upload_request("file", "text/plain", b"hello")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"]["message"], "Only PDF files are allowed");
    }

    #[tokio::test]
    async fn test_missing_file_field() {
        let (status, json) =
            send(app(), upload_request("attachment", "application/pdf", b"%PDF-1.4")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["message"], "No file uploaded");
    }

    #[tokio::test]
    async fn test_oversized_upload() {
        let app = app_with(StubExtractor::Text(RESUME_TEXT), 16);
        let bytes = [b"%PDF-".as_slice(), &[b'x'; 64]].concat();
        let (status, json) = send(app, upload_request("file", "application/pdf", &bytes)).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json["error"]["message"], "File size must be less than 16 B");
    }

    #[tokio::test]
    async fn test_unreadable_document() {
        let app = app_with(StubExtractor::Fail, 1024);
        let (status, json) = send(app, upload_request("file", "application/pdf", b"%PDF-1.4")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"]["code"], "DOCUMENT_UNREADABLE");
    }

    #[tokio::test]
    async fn test_blank_document_is_unreadable() {
        let app = app_with(StubExtractor::Text(" \n\x0C\n "), 1024);
        let (status, _) = send(app, upload_request("file", "application/pdf", b"%PDF-1.4")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_analyze_text() {
        let (status, json) = send(app(), text_request(RESUME_TEXT)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["stats"]["pages"], 1);
        assert_eq!(json["experience"]["count"], 1);
    }

    #[tokio::test]
    async fn test_analyze_text_too_short() {
        let (status, json) = send(app(), text_request("\n\n  hi  \n")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }
}
