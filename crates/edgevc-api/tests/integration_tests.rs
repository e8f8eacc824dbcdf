//! # Integration Tests for edgevc-api
//!
//! Drives the full router with `tower::ServiceExt::oneshot`: credential
//! issuance end to end, every rejection path, operational endpoints, and the
//! JSON fallback.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use tower::ServiceExt;

use edgevc_api::state::{AppConfig, AppState};
use edgevc_core::{FixedClock, SequentialIdGenerator, Timestamp};
use edgevc_vc::IssuancePipeline;

const BASE_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";
const EXAMPLES_CONTEXT: &str = "https://www.w3.org/2018/credentials/examples/v1";

/// Helper: build the test app with wall-clock time and UUID ids.
fn test_app() -> axum::Router {
    edgevc_api::app(AppState::new())
}

/// Helper: build the test app with pinned time and sequential ids.
fn fixed_app(at: &str) -> axum::Router {
    let clock = Arc::new(FixedClock::new(Timestamp::parse(at).unwrap()));
    let ids = Arc::new(SequentialIdGenerator::new("https://example.com/credentials/"));
    let state = AppState::with_pipeline(AppConfig::default(), IssuancePipeline::new(clock, ids));
    edgevc_api::app(state)
}

fn post_credential(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/credential")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::http::Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn university_degree() -> Value {
    json!({
        "credentialSubject": {
            "id": "did:example:ebfeb1f712ebc6f1c276e12ec21",
            "degree": {
                "type": "BachelorDegree",
                "university": "MIT"
            },
            "name": "Jayden Doe",
            "spouse": "did:example:c276e12ec21ebfeb1f712ebc6f1"
        },
        "issuer": {
            "id": "did:example:76e12ec712ebc6f1c221ebfeb1f",
            "name": "Example University"
        },
        "type": ["UniversityDegreeCredential"],
        "context": EXAMPLES_CONTEXT
    })
}

// -- Issuance -----------------------------------------------------------------

#[tokio::test]
async fn test_issue_university_degree() {
    let mut request = university_degree();
    request["issuer"]["id"] = json!("did:example:issuer");

    let response = test_app()
        .oneshot(post_credential(request.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );

    let vc = body_json(response).await;
    assert_eq!(vc["@context"], json!([BASE_CONTEXT, EXAMPLES_CONTEXT]));
    assert_eq!(vc["issuer"]["id"], "did:example:issuer");
    assert_eq!(vc["issuer"]["name"], "Example University");
    let types: Vec<&str> = vc["type"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t.as_str().unwrap())
        .collect();
    assert!(types.contains(&"UniversityDegreeCredential"));
    assert!(types.contains(&"VerifiableCredential"));
    assert_eq!(vc["credentialSubject"], request["credentialSubject"]);
    assert!(vc["id"].as_str().unwrap().starts_with("urn:uuid:"));
    assert_eq!(vc["credentialSchema"], json!([]));
    assert!(Timestamp::parse(vc["issuanceDate"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_issue_uses_injected_clock_and_ids() {
    let app = fixed_app("2026-03-01T08:00:00Z");

    let first = body_json(
        app.clone()
            .oneshot(post_credential(university_degree().to_string()))
            .await
            .unwrap(),
    )
    .await;
    let second = body_json(
        app.oneshot(post_credential(university_degree().to_string()))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(first["id"], "https://example.com/credentials/1");
    assert_eq!(second["id"], "https://example.com/credentials/2");
    assert_eq!(first["issuanceDate"], "2026-03-01T08:00:00Z");
}

#[tokio::test]
async fn test_sequential_issuances_have_distinct_ids() {
    let app = test_app();
    let mut ids = Vec::new();
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(post_credential(university_degree().to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        ids.push(body_json(response).await["id"].clone());
    }
    assert_ne!(ids[0], ids[1]);
}

#[tokio::test]
async fn test_empty_type_gets_base_type() {
    let mut request = university_degree();
    request["type"] = json!([]);
    request.as_object_mut().unwrap().remove("context");

    let response = test_app()
        .oneshot(post_credential(request.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let vc = body_json(response).await;
    assert_eq!(vc["type"], json!(["VerifiableCredential"]));
    assert_eq!(vc["@context"], json!([BASE_CONTEXT]));
}

#[tokio::test]
async fn test_content_type_not_required() {
    let request = Request::builder()
        .method("POST")
        .uri("/credential")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(university_degree().to_string()))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_client_supplied_issuer_fields_are_ignored() {
    let mut request = university_degree();
    request["issuanceDate"] = json!("1999-01-01T00:00:00Z");
    request["id"] = json!("urn:attacker:1");

    let response = fixed_app("2026-03-01T08:00:00Z")
        .oneshot(post_credential(request.to_string()))
        .await
        .unwrap();
    let vc = body_json(response).await;
    assert_eq!(vc["issuanceDate"], "2026-03-01T08:00:00Z");
    assert_eq!(vc["id"], "https://example.com/credentials/1");
}

// -- Rejections ---------------------------------------------------------------

#[tokio::test]
async fn test_empty_body_rejected() {
    let response = test_app().oneshot(post_credential(Body::empty())).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response).await;
    assert!(body.contains("Credential creation failed"), "{body}");
    assert!(body.contains("BAD_REQUEST"));
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let response = test_app()
        .oneshot(post_credential("{\"credentialSubject\": "))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_wrong_field_shape_is_decode_error() {
    let mut request = university_degree();
    request["type"] = json!(7);
    let response = test_app()
        .oneshot(post_credential(request.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Credential creation failed: "));
}

#[tokio::test]
async fn test_missing_subject_id_rejected() {
    let mut request = university_degree();
    request["credentialSubject"]
        .as_object_mut()
        .unwrap()
        .remove("id");
    let response = test_app()
        .oneshot(post_credential(request.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "MISSING_SUBJECT_ID");
    assert_eq!(body["error"]["details"]["rule"], "MISSING_SUBJECT_ID");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Credential creation failed: "));
}

#[tokio::test]
async fn test_missing_issuer_id_rejected() {
    let mut request = university_degree();
    request["issuer"] = json!({"name": "Example University"});
    let response = test_app()
        .oneshot(post_credential(request.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "MISSING_ISSUER_ID");
}

#[tokio::test]
async fn test_empty_object_fails_first_rule() {
    let response = test_app().oneshot(post_credential("{}")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "MISSING_SUBJECT_ID");
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let state = AppState::with_config(AppConfig {
        body_limit: 1024,
        ..AppConfig::default()
    });
    let app = edgevc_api::app(state);
    let mut request = university_degree();
    request["credentialSubject"]["padding"] = json!("x".repeat(4096));
    let response = app
        .oneshot(post_credential(request.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Credential creation failed: "));
}

#[tokio::test]
async fn test_wrong_issuer_shape_names_issuer() {
    let response = test_app()
        .oneshot(post_credential(
            r#"{"credentialSubject":{"id":"did:x"},"issuer":{"id":5}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("issuer"), "{message}");
    assert!(!message.contains("untagged"), "{message}");
}

#[tokio::test]
async fn test_null_fields_fail_validation_like_absent_ones() {
    let response = test_app()
        .oneshot(post_credential(
            r#"{"credentialSubject":{"id":"did:x"},"issuer":null,"type":null}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "MISSING_ISSUER_ID");

    let response = test_app()
        .oneshot(post_credential(r#"{"credentialSubject":null}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "MISSING_SUBJECT_ID");
}

#[tokio::test]
async fn test_get_credential_not_allowed() {
    let response = test_app().oneshot(get("/credential")).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let response = test_app().oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let response = test_app().oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

// -- OpenAPI ------------------------------------------------------------------

#[tokio::test]
async fn test_openapi_spec_served() {
    let response = test_app().oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let spec = body_json(response).await;
    assert!(spec["openapi"].as_str().unwrap().starts_with("3."));
    assert!(spec["paths"]["/credential"]["post"].is_object());
    assert!(spec["components"]["schemas"]["ClaimInput"].is_object());
}

// -- Metrics ------------------------------------------------------------------

#[tokio::test]
async fn test_metrics_absent_without_recorder() {
    let response = test_app().oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_metrics_rendered_with_recorder() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let state = AppState::new().with_metrics(Some(recorder.handle()));
    let response = edgevc_api::app(state)
        .oneshot(get("/metrics"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}

// -- Fallback -----------------------------------------------------------------

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let response = test_app().oneshot(get("/credentials/123")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("/credentials/123"));
}
