//! HTTP handlers for the healthcare AI service.

pub mod diet;
pub mod report;

use axum::{body::Bytes, extract::State, response::IntoResponse, Json};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Instant;

use crate::error::ApiError;
use crate::models::from_json_object;
use crate::services::{metrics, GenerationParams, TextProvider};
use crate::startup::AppState;

pub const INDEX_MESSAGE: &str = "Healthcare AI Server is Running!";

pub async fn index() -> &'static str {
    INDEX_MESSAGE
}

/// Liveness endpoint. Reports whether the generation client is available
/// but stays healthy either way.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let generation_client = if state.text_provider.is_some() {
        "configured"
    } else {
        "unconfigured"
    };

    Json(json!({
        "status": "ok",
        "service": "healthcare-ai-service",
        "version": env!("CARGO_PKG_VERSION"),
        "generation_client": generation_client
    }))
}

pub async fn serve_metrics() -> impl IntoResponse {
    metrics::get_metrics()
}

/// Decode a request body, which must be a JSON object. The content type is
/// not checked.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    from_json_object(body).map_err(ApiError::InvalidBody)
}

/// Call the generation client once and record latency, tokens and errors.
async fn generate(
    provider: &dyn TextProvider,
    endpoint: &str,
    prompt: &str,
    params: &GenerationParams,
) -> Result<String, ApiError> {
    let start = Instant::now();
    let result = provider.generate(prompt, params).await;
    metrics::record_provider_latency(provider.model(), endpoint, start.elapsed().as_secs_f64());

    match result {
        Ok(response) => {
            metrics::record_tokens(provider.model(), response.input_tokens, response.output_tokens);
            tracing::debug!(
                model = %provider.model(),
                finish_reason = ?response.finish_reason,
                output_len = response.text.len(),
                "Generation completed"
            );
            Ok(response.text)
        }
        Err(e) => {
            metrics::record_provider_error(endpoint, e.kind());
            Err(e.into())
        }
    }
}
