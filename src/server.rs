//! Web server module for the exporter.
//!
//! Serves the Prometheus exposition endpoint plus a landing page and a
//! liveness probe.

use axum::{
    Json, Router,
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

use crate::collector::Exporter;
use crate::metrics::CONTENT_TYPE;

/// Landing page pointing scrapers at `/metrics`.
const INDEX_HTML: &str =
    "<html><head><title>endoflife exporter</title></head>\
     <body>Metrics are available at <a href=\"/metrics\">/metrics</a></body></html>";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub exporter: Arc<Exporter>,
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/healthz", get(healthz_handler))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .with_state(state)
}

/// Landing page handler.
async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Liveness probe.
async fn healthz_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Prometheus scrape endpoint.
///
/// Runs one full collection pass per request. Upstream failures only shrink
/// the sample set; this handler always answers 200.
async fn metrics_handler(State(state): State<AppState>) -> Response {
    let body = state.exporter.render().await;
    ([(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response()
}
