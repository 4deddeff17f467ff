use crate::server::{routes, static_files};
use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use reviewscope_classifiers::ReviewAnalyzer;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub analyzer: ReviewAnalyzer,
    pub metrics: PrometheusHandle,
}

impl AppState {
    pub fn new(analyzer: ReviewAnalyzer, metrics: PrometheusHandle) -> Self {
        Self { analyzer, metrics }
    }
}

/// Build the Axum application
pub fn build_app(state: AppState) -> Router {
    // API routes
    let api_routes = Router::new()
        .route("/health", get(routes::health))
        .route("/analyze", post(routes::analyze));

    Router::new()
        .nest("/api", api_routes)
        .route("/metrics", get(routes::prometheus_metrics))
        .fallback(static_files::serve_static)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server
pub async fn run_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = build_app(state);

    tracing::info!("Starting ReviewScope server on {}", addr);
    tracing::info!("Open http://{} in your browser", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
