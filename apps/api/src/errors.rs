#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ats_client::AtsClientError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Conversion failures are deliberately absent: they are non-fatal, handled
/// at the normalizer boundary, and never surface to the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Scoring request failed: {0}")]
    Scoring(String),

    #[error("Refine export failed: {0}")]
    RefineExport(String),

    #[error("Submission superseded by a newer document selection")]
    Superseded,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn scoring(err: AtsClientError) -> Self {
        AppError::Scoring(err.to_string())
    }

    pub fn refine(err: AtsClientError) -> Self {
        AppError::RefineExport(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Scoring(msg) => {
                tracing::error!("Scoring error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SCORING_ERROR",
                    "The scoring service could not process the submission".to_string(),
                )
            }
            AppError::RefineExport(msg) => {
                tracing::error!("Refine export error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "REFINE_ERROR",
                    "Failed to generate the refined document".to_string(),
                )
            }
            AppError::Superseded => (
                StatusCode::CONFLICT,
                "SUPERSEDED",
                "A newer document was selected while this submission was in flight".to_string(),
            ),
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
