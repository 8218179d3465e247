use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::ProviderError;

/// Body sent when no generation client could be created at startup. It is
/// written verbatim rather than serialized, so it carries no JSON content type.
pub const NOT_CONFIGURED_BODY: &str = r#"{"error": "Gemini API key not configured."}"#;

/// Failures of a generation request. Every variant maps to HTTP 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Gemini API key not configured.")]
    NotConfigured,

    #[error("Invalid request body: {0}")]
    InvalidBody(serde_json::Error),

    #[error("{0}")]
    Generation(#[from] ProviderError),

    #[error("Malformed report from model: {0}")]
    MalformedReport(serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotConfigured => {
                (StatusCode::INTERNAL_SERVER_ERROR, NOT_CONFIGURED_BODY).into_response()
            }
            err => {
                tracing::error!(error = %err, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
