use axum::{body::Bytes, extract::State, http::StatusCode};

use super::{generate, parse_body};
use crate::error::ApiError;
use crate::models::{PatientProfile, RiskReport};
use crate::prompts::build_risk_prompt;
use crate::services::{metrics, GenerationParams};
use crate::startup::AppState;

/// `POST /get-report`: risk assessment as Markdown text.
///
/// The model replies with a JSON envelope; only `report_markdown` is returned.
#[tracing::instrument(skip(state, body))]
pub async fn get_report(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, String), ApiError> {
    let provider = state.provider()?;
    let profile: PatientProfile = parse_body(&body)?;

    let prompt = build_risk_prompt(&profile);
    let params = GenerationParams::json(state.config.prompts.risk_temperature);
    let output = generate(provider.as_ref(), "get-report", &prompt, &params).await?;

    let report = RiskReport::from_model_output(&output).map_err(ApiError::MalformedReport)?;
    let level = report.level();
    metrics::record_risk_report(level.as_str());
    tracing::info!(risk_level = %level, "Risk report generated");

    Ok((StatusCode::OK, report.into_report_text()))
}
