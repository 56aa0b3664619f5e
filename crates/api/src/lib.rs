//! Model Monitor API Server
//!
//! REST surface and periodic threshold checks over the model monitor registry.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use model_monitor::{MonitorRegistry, RegistrySettings};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

mod error;
mod routes;
mod scheduler;
mod settings;

pub use error::ServiceError;
pub use scheduler::spawn_threshold_checker;
pub use settings::{
    LoggingSettings, SchedulerSettings, ServerSettings, ServiceSettings, CONFIG_PATH_ENV,
};

/// Application state shared across handlers
pub struct AppState {
    /// Monitor registry
    pub registry: MonitorRegistry,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    /// Prometheus handle, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: RegistrySettings) -> Self {
        Self {
            registry: MonitorRegistry::new(settings),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
    pub version: String,
    pub uptime_seconds: u64,
    pub monitor_count: usize,
    pub alert_count: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route(
            "/api/v1/monitors",
            get(routes::monitors::list_monitors).post(routes::monitors::add_monitor),
        )
        .route("/api/v1/monitors/:model", get(routes::monitors::get_monitor))
        .route(
            "/api/v1/monitors/:model/performance",
            put(routes::monitors::update_performance),
        )
        .route(
            "/api/v1/monitors/:model/drift",
            put(routes::monitors::update_drift),
        )
        .route("/api/v1/alerts", get(routes::alerts::get_alerts))
        .route(
            "/api/v1/thresholds/check",
            post(routes::alerts::check_thresholds),
        )
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        monitor_count: state.registry.monitor_count(),
        alert_count: state.registry.alert_count(),
    })
}

/// Prometheus exposition handler
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Initialize logging
pub fn init_logging(settings: &LoggingSettings) -> Result<(), ServiceError> {
    let level = settings.max_level()?;
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let result = if settings.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.expect("Failed to set tracing subscriber");
    Ok(())
}

/// Run the server until it fails
pub async fn run_server(settings: ServiceSettings) -> Result<(), ServiceError> {
    let addr = settings.server.socket_addr()?;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServiceError::Metrics(e.to_string()))?;
    let state = Arc::new(AppState::new(settings.registry.clone()).with_metrics(handle));

    if let Some(period) = settings.scheduler.interval() {
        spawn_threshold_checker(state.clone(), period);
    } else {
        info!("Threshold checker disabled");
    }

    let app = create_router(state);

    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
