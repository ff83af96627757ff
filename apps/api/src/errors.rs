use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::application::error::{ApplicationError, SubmissionError, ValidationError};
use crate::catalog::client::CatalogError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Application(err.into())
    }
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        AppError::Application(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Catalog(e) => {
                tracing::error!("Catalog error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "CATALOG_UNAVAILABLE",
                    "Job listings are temporarily unavailable".to_string(),
                )
            }
            AppError::Application(e) => {
                let status = match e {
                    ApplicationError::Validation(ValidationError::AttachmentTooLarge { .. }) => {
                        StatusCode::PAYLOAD_TOO_LARGE
                    }
                    ApplicationError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    ApplicationError::Encoding(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    ApplicationError::Submission(SubmissionError::Timeout) => {
                        StatusCode::GATEWAY_TIMEOUT
                    }
                    ApplicationError::Submission(_) => StatusCode::BAD_GATEWAY,
                };
                if e.is_retryable() {
                    tracing::error!("Submission failed: {e}");
                } else {
                    tracing::info!("Submission rejected: {e}");
                }
                (status, e.code(), e.to_string())
            }
            AppError::Multipart(e) => {
                let status = e.status();
                if status == StatusCode::PAYLOAD_TOO_LARGE {
                    tracing::info!("Upload rejected by body limit: {}", e.body_text());
                    (
                        status,
                        "ATTACHMENT_TOO_LARGE",
                        "Attachment exceeds the maximum upload size".to_string(),
                    )
                } else {
                    (status, "INVALID_MULTIPART", e.body_text())
                }
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
