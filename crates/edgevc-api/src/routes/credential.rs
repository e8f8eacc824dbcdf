//! # Credential Issuance
//!
//! `POST /credential` turns a claim set into an unsigned W3C Verifiable
//! Credential. Each request walks one linear path:
//!
//! ```text
//! Decoding ──▶ Building ──▶ Validating ──▶ Encoding ──▶ 201
//!    │                          │              │
//!    └──── 400 ◀────────────────┘              └──▶ 500
//! ```
//!
//! The body is read as raw bytes so that decoding does not depend on the
//! request's `Content-Type`.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;

use edgevc_vc::{ClaimInput, Credential};

use crate::error::AppError;
use crate::middleware::metrics;
use crate::state::AppState;

/// Build the credential router.
pub fn router() -> Router<AppState> {
    Router::new().route("/credential", post(create_credential))
}

/// POST /credential: Issue a Verifiable Credential.
///
/// The issuer assigns `id`, `issuanceDate` and the base `@context`; the
/// caller supplies subject, issuer, types and an optional extra context.
#[utoipa::path(
    post,
    path = "/credential",
    request_body = ClaimInput,
    responses(
        (status = 201, description = "Credential issued", body = Credential),
        (status = 400, description = "Malformed claim set or violated rule", body = crate::error::ErrorBody),
        (status = 413, description = "Request body exceeds the size limit", body = crate::error::ErrorBody),
        (status = 500, description = "Credential could not be encoded", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
pub async fn create_credential(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let body = body?;
    let input: ClaimInput =
        serde_json::from_slice(&body).map_err(|e| AppError::Decode(e.to_string()))?;

    let credential = state.pipeline.issue(input).map_err(|err| {
        metrics::record_rejected(err.rule());
        AppError::from(err)
    })?;

    let encoded = encode(&credential)?;
    metrics::record_issued();
    tracing::info!(id = %credential.id(), "credential issued");

    Ok((
        StatusCode::CREATED,
        [(header::CONTENT_TYPE, "application/json")],
        encoded,
    )
        .into_response())
}

fn encode(credential: &Credential) -> Result<Vec<u8>, AppError> {
    serde_json::to_vec(credential).map_err(|e| {
        AppError::Internal(format!("failed to encode credential {}: {e}", credential.id()))
    })
}
