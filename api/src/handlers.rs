use crate::app_state::AppState;
use crate::error::{SummarizeError, MISSING_FILE};
use crate::summary_response::SummaryResponse;
use crate::upload::{TemporaryDocument, UploadRequest};
use anyhow::Context;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::response::Html;
use axum::Json;
use pdf_rag::ExtractionOutcome;
use uuid::Uuid;

pub const KEY_LOADED: &str = "API key is loaded ✅";
pub const KEY_MISSING: &str = "API key missing ❌";

static INDEX_HTML: &str = include_str!("../static/index.html");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn check_key(State(state): State<AppState>) -> &'static str {
    if state.api_key_loaded {
        KEY_LOADED
    } else {
        KEY_MISSING
    }
}

pub async fn summarize(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SummaryResponse>, SummarizeError> {
    let request_id = Uuid::new_v4();
    // Anything that is not a multipart form cannot carry a file part.
    let multipart = multipart.map_err(|rejection| {
        log::warn!("[{}] Not a multipart upload: {}", request_id, rejection);
        SummarizeError::Validation(MISSING_FILE)
    })?;
    let upload = UploadRequest::from_multipart(multipart).await?.validate()?;
    log::info!(
        "[{}] Summarize request for {} ({} bytes)",
        request_id,
        upload.filename,
        upload.bytes.len()
    );

    let upload_dir = state.upload_dir.clone();
    let bytes = upload.bytes.clone();
    let document = tokio::task::spawn_blocking(move || TemporaryDocument::persist(&upload_dir, &bytes))
        .await
        .context("upload writer task failed")?
        .context("failed to store upload")?;
    log::info!(
        "[{}] File saved temporarily at: {}",
        request_id,
        document.path().display()
    );

    let extractor = state.extractor.clone();
    let path = document.path().to_path_buf();
    let outcome = tokio::task::spawn_blocking(move || extractor.extract(&path))
        .await
        .unwrap_or_else(|e| ExtractionOutcome::Failed(format!("extraction task failed: {}", e)));

    let text = match outcome.into_usable_text() {
        Some(text) => text,
        None => {
            log::warn!("[{}] Insufficient text extracted from {}", request_id, upload.filename);
            return Err(SummarizeError::Extraction);
        }
    };

    let summary = state.query_service.answer(&text, &upload.query).await?;
    log::info!("[{}] Answer generated ({} characters)", request_id, summary.chars().count());

    Ok(Json(SummaryResponse { summary }))
}
