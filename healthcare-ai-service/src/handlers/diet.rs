use axum::{body::Bytes, extract::State, http::StatusCode};

use super::{generate, parse_body};
use crate::error::ApiError;
use crate::models::DietRequest;
use crate::prompts::build_diet_prompt;
use crate::services::GenerationParams;
use crate::startup::AppState;

/// `POST /generate-diet`: one-day meal plan, returned exactly as generated.
#[tracing::instrument(skip(state, body))]
pub async fn generate_diet(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, String), ApiError> {
    let provider = state.provider()?;
    let request: DietRequest = parse_body(&body)?;

    tracing::info!(
        target_calories = %request.target_calories(),
        dietary_goal = %request.dietary_goal(),
        "Generating diet plan"
    );

    let prompt = build_diet_prompt(&request);
    let plan = generate(provider.as_ref(), "generate-diet", &prompt, &GenerationParams::text()).await?;

    Ok((StatusCode::OK, plan))
}
