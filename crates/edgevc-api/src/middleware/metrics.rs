//! # Prometheus Metrics
//!
//! Counters are recorded through the `metrics` facade. Without an installed
//! recorder they are no-ops; the binary installs a Prometheus recorder and
//! `GET /metrics` renders it.

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;

/// Every HTTP request, labelled by method, route template and status.
pub const HTTP_REQUESTS_TOTAL: &str = "edgevc_http_requests_total";

/// Credentials returned with 201.
pub const CREDENTIALS_ISSUED_TOTAL: &str = "edgevc_credentials_issued_total";

/// Issuance requests refused by a validation rule, labelled by rule.
pub const CREDENTIALS_REJECTED_TOTAL: &str = "edgevc_credentials_rejected_total";

/// Label value for requests that matched no route.
const UNMATCHED: &str = "unmatched";

/// Middleware that counts requests once the response is known.
///
/// Uses the matched route template rather than the raw URI to keep label
/// cardinality bounded.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED.to_owned());

    let response = next.run(request).await;

    metrics::counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method,
        "path" => path,
        "status" => response.status().as_u16().to_string()
    )
    .increment(1);

    response
}

/// Record one issued credential.
pub fn record_issued() {
    metrics::counter!(CREDENTIALS_ISSUED_TOTAL).increment(1);
}

/// Record one rejection under the violated rule's code.
pub fn record_rejected(rule: &'static str) {
    metrics::counter!(CREDENTIALS_REJECTED_TOTAL, "rule" => rule).increment(1);
}
