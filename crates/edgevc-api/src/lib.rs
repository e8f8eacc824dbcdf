//! # edgevc-api: HTTP Service for edge-vc
//!
//! Exposes the credential issuance pipeline over Axum.
//!
//! ## API Surface
//!
//! | Route | Module | Purpose |
//! |-------|--------|---------|
//! | `POST /credential` | [`routes::credential`] | Issue a credential |
//! | `GET /health/liveness` | this crate | Process is up |
//! | `GET /health/readiness` | this crate | Ready to serve |
//! | `GET /openapi.json` | [`openapi`] | Generated OpenAPI document |
//! | `GET /metrics` | this crate | Prometheus exposition, when a recorder is installed |
//!
//! Unmatched routes answer with a JSON 404 [`error::ErrorBody`].
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → DefaultBodyLimit → MetricsMiddleware → Handler
//! ```

pub mod cli;
pub mod error;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, Uri};
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::error::AppError;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.body_limit;

    Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .route("/metrics", get(render_metrics))
        .merge(routes::credential::router())
        .merge(openapi::router())
        .fallback(not_found)
        .layer(from_fn(middleware::metrics::track_requests))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::tracing_layer::layer())
        .with_state(state)
}

/// Liveness probe. Always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. The pipeline has no external dependencies to wait on.
async fn readiness() -> &'static str {
    "ready"
}

/// GET /metrics: Prometheus text exposition.
async fn render_metrics(State(state): State<AppState>) -> Result<Response, AppError> {
    let handle = state
        .metrics
        .as_ref()
        .ok_or_else(|| AppError::NotFound("metrics recorder not installed".to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    )
        .into_response())
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}
