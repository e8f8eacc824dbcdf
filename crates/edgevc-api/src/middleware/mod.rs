//! # Middleware
//!
//! - `metrics`: per-request Prometheus counters.
//! - `tracing_layer`: request spans via `tower_http::trace::TraceLayer`.

pub mod metrics;
pub mod tracing_layer;
