use crate::summary_response::ErrorResponse;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub const MISSING_FILE: &str = "No file part in the request.";
pub const MISSING_QUERY: &str = "No query provided in the request.";
pub const INVALID_FILE: &str = "Please select a valid PDF file.";

#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    /// Missing or malformed input the user can fix.
    #[error("{0}")]
    Validation(&'static str),
    #[error("Failed to read upload: {0}")]
    Upload(#[from] MultipartError),
    #[error("Could not extract sufficient text from PDF. File might be scanned/encrypted.")]
    Extraction,
    #[error("Internal server error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl SummarizeError {
    pub fn status(&self) -> StatusCode {
        match self {
            SummarizeError::Validation(_) => StatusCode::BAD_REQUEST,
            SummarizeError::Upload(e) => e.status(),
            SummarizeError::Extraction | SummarizeError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for SummarizeError {
    fn into_response(self) -> Response {
        match &self {
            SummarizeError::Internal(e) => {
                log::error!("A critical error occurred during summarization: {:#}", e)
            }
            other => log::warn!("Rejected summarize request: {}", other),
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(
            SummarizeError::Validation(MISSING_FILE).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SummarizeError::Extraction.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            SummarizeError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_carry_their_cause() {
        let err = SummarizeError::Internal(
            anyhow::anyhow!("connection refused").context("Gemini request failed"),
        );
        assert_eq!(
            err.to_string(),
            "Internal server error: Gemini request failed: connection refused"
        );
    }
}
