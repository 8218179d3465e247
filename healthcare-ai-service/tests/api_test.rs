//! Router-level tests for the generation endpoints, driven with mock providers.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use healthcare_ai_service::config::HealthcareConfig;
use healthcare_ai_service::services::providers::mock::MockTextProvider;
use healthcare_ai_service::services::TextProvider;
use healthcare_ai_service::startup::{build_router, AppState};
use std::sync::Arc;
use tower::util::ServiceExt;

fn app_with(provider: Option<Arc<dyn TextProvider>>) -> Router {
    build_router(AppState::new(HealthcareConfig::unconfigured(), provider))
}

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Option<String>, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn index_is_up_without_generation_client() {
    let (status, _, body) = send(
        app_with(None),
        Request::builder().uri("/").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Healthcare AI Server is Running!");
}

#[tokio::test]
async fn index_is_up_with_generation_client() {
    let provider: Arc<dyn TextProvider> = Arc::new(MockTextProvider::echo());
    let (status, _, body) = send(
        app_with(Some(provider)),
        Request::builder().uri("/").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Healthcare AI Server is Running!");
}

#[tokio::test]
async fn unconfigured_client_short_circuits_every_body() {
    for uri in ["/get-report", "/generate-diet"] {
        for body in ["", "{}", "not json", r#"{"Age": 40}"#] {
            let (status, content_type, text) = send(app_with(None), post(uri, body)).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri} {body:?}");
            assert_eq!(text, r#"{"error": "Gemini API key not configured."}"#);
            assert!(text.contains("not configured"));
            assert!(!content_type.unwrap_or_default().starts_with("application/json"));
        }
    }
}

#[tokio::test]
async fn diet_plan_echo_contains_request_values() {
    let provider: Arc<dyn TextProvider> = Arc::new(MockTextProvider::echo());
    let (status, content_type, body) = send(
        app_with(Some(provider)),
        post(
            "/generate-diet",
            r#"{"targetCalories": 1800, "dietaryGoal": "Gain Muscle"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/plain"));
    for expected in ["1800", "Gain Muscle", "Breakfast", "Lunch", "Dinner"] {
        assert!(body.contains(expected), "missing {expected}");
    }
}

#[tokio::test]
async fn diet_plan_defaults_and_plain_text_request() {
    let mock = Arc::new(MockTextProvider::fixed("**Breakfast**: oats"));
    let provider: Arc<dyn TextProvider> = mock.clone();
    let (status, _, body) = send(app_with(Some(provider)), post("/generate-diet", "{}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "**Breakfast**: oats");

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    let (prompt, params) = &calls[0];
    assert!(prompt.contains("2000"));
    assert!(prompt.contains("Maintain Weight"));
    assert!(!params.json_output);
}

#[tokio::test]
async fn risk_report_unwraps_markdown_from_envelope() {
    let mock = Arc::new(MockTextProvider::fixed(
        r###"{"risk_level": "High", "report_markdown": "## Overall NCD Risk Assessment\n**High** risk."}"###,
    ));
    let provider: Arc<dyn TextProvider> = mock.clone();
    let (status, content_type, body) = send(
        app_with(Some(provider)),
        post(
            "/get-report",
            r#"{"Age": 61, "Gender": "Male", "BMI": 33.1, "Smoking Status": "Current"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/plain"));
    assert_eq!(body, "## Overall NCD Risk Assessment\n**High** risk.");

    let calls = mock.calls();
    let (prompt, params) = &calls[0];
    assert!(params.json_output);
    assert_eq!(params.temperature, Some(0.3));
    assert!(prompt.contains("- Age: 61"));
    assert!(prompt.contains("- BMI: 33.1"));
    assert!(prompt.contains("- Smoking: Current"));
    assert!(prompt.contains("- Activity: \n"));
}

#[tokio::test]
async fn risk_report_without_markdown_key_uses_placeholder() {
    let provider: Arc<dyn TextProvider> =
        Arc::new(MockTextProvider::fixed(r#"{"risk_level": "Low"}"#));
    let (status, _, body) = send(app_with(Some(provider)), post("/get-report", "{}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Error: No report text found.");
}

#[tokio::test]
async fn risk_report_with_malformed_model_output_is_json_error() {
    let provider: Arc<dyn TextProvider> = Arc::new(MockTextProvider::fixed("## not json"));
    let (status, content_type, body) =
        send(app_with(Some(provider)), post("/get-report", "{}")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Malformed report from model"));
}

#[tokio::test]
async fn generation_failure_is_reported_with_its_message() {
    for uri in ["/get-report", "/generate-diet"] {
        let provider: Arc<dyn TextProvider> =
            Arc::new(MockTextProvider::failing("quota exceeded for project"));
        let (status, _, body) = send(app_with(Some(provider)), post(uri, "{}")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "quota exceeded for project");
    }
}

#[tokio::test]
async fn invalid_body_is_json_error_when_configured() {
    let mock = Arc::new(MockTextProvider::echo());
    let provider: Arc<dyn TextProvider> = mock.clone();
    let bodies = [
        "",
        "not json",
        "null",
        "[]",
        r#"[1500, "Lose Weight"]"#,
        r#"[58, "Male"]"#,
        "\"Lose Weight\"",
    ];

    for uri in ["/get-report", "/generate-diet"] {
        for body in bodies {
            let (status, _, text) = send(app_with(Some(provider.clone())), post(uri, body)).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri} {body:?}");
            let json: serde_json::Value = serde_json::from_str(&text).unwrap();
            assert!(json["error"]
                .as_str()
                .unwrap()
                .starts_with("Invalid request body"));
        }
    }

    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn risk_report_tolerates_non_string_level() {
    let provider: Arc<dyn TextProvider> = Arc::new(MockTextProvider::fixed(
        r###"{"risk_level": 3, "report_markdown": "## Report"}"###,
    ));
    let (status, _, body) = send(app_with(Some(provider)), post("/get-report", "{}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "## Report");
}

#[tokio::test]
async fn body_without_content_type_is_accepted() {
    let provider: Arc<dyn TextProvider> = Arc::new(MockTextProvider::echo());
    let request = Request::builder()
        .method("POST")
        .uri("/generate-diet")
        .body(Body::from(r#"{"dietaryGoal": "Lose Weight"}"#))
        .unwrap();

    let (status, _, body) = send(app_with(Some(provider)), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Lose Weight"));
}

#[tokio::test]
async fn health_reports_generation_client_state() {
    let (status, _, body) = send(
        app_with(None),
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "healthcare-ai-service");
    assert_eq!(json["generation_client"], "unconfigured");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let response = app_with(None)
        .oneshot(
            Request::builder()
                .uri("/")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
}
