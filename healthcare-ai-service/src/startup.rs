//! Application startup and lifecycle management.

use crate::config::HealthcareConfig;
use crate::error::ApiError;
use crate::handlers::{self, diet, report};
use crate::services::metrics;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::{ProviderError, TextProvider};
use axum::{
    extract::{MatchedPath, Request},
    middleware::{from_fn, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{request_id_middleware, REQUEST_ID_HEADER};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: HealthcareConfig,
    /// `None` when the generation client could not be created at startup.
    pub text_provider: Option<Arc<dyn TextProvider>>,
}

impl AppState {
    pub fn new(config: HealthcareConfig, text_provider: Option<Arc<dyn TextProvider>>) -> Self {
        Self {
            config,
            text_provider,
        }
    }

    /// The generation client, or the "not configured" error.
    pub fn provider(&self) -> Result<Arc<dyn TextProvider>, ApiError> {
        self.text_provider.clone().ok_or(ApiError::NotConfigured)
    }
}

/// Create the Gemini provider described by `config`.
pub fn build_text_provider(config: &HealthcareConfig) -> Result<Arc<dyn TextProvider>, ProviderError> {
    let api_key = config.gemini.api_key.clone().ok_or_else(|| {
        ProviderError::NotConfigured("GEMINI_API_KEY or GOOGLE_API_KEY is not set".to_string())
    })?;

    let provider = GeminiTextProvider::new(GeminiConfig {
        api_key,
        model: config.gemini.model.clone(),
        api_base: config.gemini.api_base.clone(),
        timeout: Duration::from_secs(config.gemini.timeout_secs),
    })?;

    Ok(Arc::new(provider))
}

async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(req).await;

    metrics::record_http_request(
        &method,
        &path,
        response.status().as_str(),
        start.elapsed().as_secs_f64(),
    );

    response
}

/// Build the HTTP router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::serve_metrics))
        .route("/get-report", post(report::get_report))
        .route("/generate-diet", post(diet::generate_diet))
        .with_state(state)
        .layer(from_fn(track_metrics))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    http_port: u16,
    http_listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// A generation client that cannot be created is logged and left unset;
    /// the server still starts.
    pub async fn build(config: HealthcareConfig) -> Result<Self, AppError> {
        let text_provider = match build_text_provider(&config) {
            Ok(provider) => {
                tracing::info!(
                    model = %config.gemini.model,
                    "Initialized Gemini text provider"
                );
                Some(provider)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error initializing Gemini client");
                None
            }
        };

        Self::build_with_provider(config, text_provider).await
    }

    /// Build the application around an already constructed generation client.
    pub async fn build_with_provider(
        config: HealthcareConfig,
        text_provider: Option<Arc<dyn TextProvider>>,
    ) -> Result<Self, AppError> {
        // Bind HTTP listener (port 0 = random port for testing)
        let http_addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let http_listener = TcpListener::bind(http_addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", http_addr, e);
            AppError::from(e)
        })?;
        let http_port = http_listener.local_addr()?.port();

        tracing::info!("Healthcare AI service listening on port {}", http_port);

        Ok(Self {
            http_port,
            http_listener,
            state: AppState::new(config, text_provider),
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.http_listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}
