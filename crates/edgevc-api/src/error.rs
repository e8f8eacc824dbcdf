//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every failure leaves the service as a JSON [`ErrorBody`] with a
//! machine-readable code and a human-readable message.
//!
//! | Variant | Status | Code |
//! |---------|--------|------|
//! | [`AppError::Body`] | 413 over the size limit, else the rejection's status | `PAYLOAD_TOO_LARGE` / `BAD_REQUEST` |
//! | [`AppError::Decode`] | 400 | `BAD_REQUEST` |
//! | [`AppError::Validation`] | 400 | the violated rule, e.g. `MISSING_SUBJECT_ID` |
//! | [`AppError::NotFound`] | 404 | `NOT_FOUND` |
//! | [`AppError::Internal`] | 500 | `INTERNAL_ERROR` |
//!
//! Client faults are logged at `debug`. Internal errors are logged at
//! `error` and their message is replaced before it reaches the client.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use edgevc_vc::ValidationError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "BAD_REQUEST", "EMPTY_TYPE").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details, present only for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body could not be read, e.g. it exceeds the size limit.
    #[error("Credential creation failed: {}", .0.body_text())]
    Body(#[from] BytesRejection),

    /// Request body is not a well-formed claim set (400).
    #[error("Credential creation failed: {0}")]
    Decode(String),

    /// Claim set decoded but the credential failed a rule (400).
    #[error("Credential creation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Body(rejection) => match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
                status if status.is_server_error() => (status, "INTERNAL_ERROR"),
                status => (status, "BAD_REQUEST"),
            },
            Self::Decode(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Validation(err) => (StatusCode::BAD_REQUEST, err.rule()),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = if status.is_server_error() {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "internal server error");
        } else {
            tracing::debug!(code, error = %self, "request rejected");
        }

        let details = match &self {
            Self::Validation(err) => Some(serde_json::json!({ "rule": err.rule() })),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}
