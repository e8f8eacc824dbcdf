//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the issuance API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "edge-vc",
        version = "0.1.0",
        description = "Issues unsigned W3C Verifiable Credentials from caller-supplied claims.",
        license(name = "Apache-2.0")
    ),
    paths(crate::routes::credential::create_credential),
    components(schemas(
        edgevc_vc::ClaimInput,
        edgevc_vc::Issuer,
        edgevc_vc::Credential,
        edgevc_vc::CredentialDocument,
        edgevc_vc::TypedId,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags((name = "credentials", description = "Verifiable Credential issuance"))
)]
pub struct ApiDoc;

/// Serves the OpenAPI JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
