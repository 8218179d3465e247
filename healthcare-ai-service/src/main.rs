use healthcare_ai_service::config::HealthcareConfig;
use healthcare_ai_service::services::metrics::init_metrics;
use healthcare_ai_service::startup::Application;
use service_core::config::optional_env;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let log_level = optional_env("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
    let otlp_endpoint = optional_env("OTLP_ENDPOINT");
    init_tracing("healthcare-ai-service", &log_level, otlp_endpoint.as_deref());

    init_metrics();

    let config = HealthcareConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
