//! End-to-end tests for the gateway router, driven through `tower::oneshot`
//! against a stubbed provider. No network involved.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use snapsight_clarifai::AnalysisProvider;
use snapsight_core::{Prediction, SnapsightError};
use snapsight_gateway::{GatewayState, build_router};

const TEST_TOKEN: &str = "test-token-1234";
const BOUNDARY: &str = "snapsight-test-boundary";

/// Provider stub returning canned predictions or a canned failure.
struct StubProvider {
    fail: bool,
}

impl StubProvider {
    fn respond(&self) -> Result<Vec<Prediction>, SnapsightError> {
        if self.fail {
            Err(SnapsightError::Provider {
                code: 11102,
                message: "Invalid credentials".into(),
            })
        } else {
            Ok(vec![
                Prediction::new("dog", 0.98),
                Prediction::new("pet", 0.91),
            ])
        }
    }
}

#[async_trait]
impl AnalysisProvider for StubProvider {
    async fn analyze_bytes(
        &self,
        _bytes: &[u8],
        _mime_type: &str,
    ) -> Result<Vec<Prediction>, SnapsightError> {
        self.respond()
    }

    async fn analyze_url(&self, _url: &str) -> Result<Vec<Prediction>, SnapsightError> {
        self.respond()
    }
}

fn test_app(token: Option<&str>, fail: bool) -> axum::Router {
    build_router(GatewayState {
        provider: Arc::new(StubProvider { fail }),
        bearer_token: token.map(String::from),
    })
}

async fn send(
    app: axum::Router,
    req: Request<Body>,
) -> (StatusCode, Value, axum::http::HeaderMap) {
    let resp = app.oneshot(req).await.expect("request should not error");
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body, headers)
}

fn url_request(token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/analyze-image-url")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn multipart_request(token: Option<&str>, field: &str, payload: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"photo.jpg\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method("POST")
        .uri("/analyze-image")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

fn assert_prediction_shape(body: &Value) {
    let predictions = body["predictions"].as_array().expect("predictions array");
    assert!(!predictions.is_empty());
    for p in predictions {
        let obj = p.as_object().expect("prediction object");
        assert_eq!(obj.len(), 2, "prediction must have exactly two fields");
        assert!(obj["name"].is_string());
        let confidence = obj["confidence"].as_f64().expect("confidence number");
        assert!((0.0..=1.0).contains(&confidence));
    }
}

#[tokio::test]
async fn health_is_public() {
    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body, _) = send(test_app(Some(TEST_TOKEN), false), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "snapsight");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn analyze_url_rejects_missing_token() {
    let req = url_request(None, json!({"url": "https://example.com/cat.jpg"}));
    let (status, body, headers) = send(test_app(Some(TEST_TOKEN), false), req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Missing Bearer token");
    assert_eq!(headers.get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
}

#[tokio::test]
async fn analyze_url_rejects_wrong_token() {
    let req = url_request(Some("wrong"), json!({"url": "https://example.com/cat.jpg"}));
    let (status, body, headers) = send(test_app(Some(TEST_TOKEN), false), req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid Bearer token");
    assert!(headers.contains_key(header::WWW_AUTHENTICATE));
}

#[tokio::test]
async fn analyze_url_happy_path() {
    let req = url_request(Some(TEST_TOKEN), json!({"url": "https://example.com/cat.jpg"}));
    let (status, body, _) = send(test_app(Some(TEST_TOKEN), false), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_prediction_shape(&body);
}

#[tokio::test]
async fn analyze_url_rejects_invalid_url() {
    let req = url_request(Some(TEST_TOKEN), json!({"url": "not a url"}));
    let (status, body, _) = send(test_app(Some(TEST_TOKEN), false), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["detail"].as_str().expect("detail string");
    assert!(!detail.is_empty());
}

#[tokio::test]
async fn analyze_url_rejects_file_scheme() {
    let req = url_request(Some(TEST_TOKEN), json!({"url": "file:///etc/passwd"}));
    let (status, body, _) = send(test_app(Some(TEST_TOKEN), false), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("scheme"));
}

#[tokio::test]
async fn analyze_image_happy_path() {
    let req = multipart_request(Some(TEST_TOKEN), "file", b"\xff\xd8\xff\xe0 fake jpeg bytes");
    let (status, body, _) = send(test_app(Some(TEST_TOKEN), false), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_prediction_shape(&body);
}

#[tokio::test]
async fn analyze_image_rejects_missing_token() {
    let req = multipart_request(None, "file", b"payload");
    let (status, body, _) = send(test_app(Some(TEST_TOKEN), false), req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Missing Bearer token");
}

#[tokio::test]
async fn analyze_image_rejects_missing_file_field() {
    let req = multipart_request(Some(TEST_TOKEN), "attachment", b"payload");
    let (status, body, _) = send(test_app(Some(TEST_TOKEN), false), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Missing file");
}

#[tokio::test]
async fn analyze_image_rejects_empty_payload() {
    let req = multipart_request(Some(TEST_TOKEN), "file", b"");
    let (status, body, _) = send(test_app(Some(TEST_TOKEN), false), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Empty file");
}

#[tokio::test]
async fn provider_failure_maps_to_bad_gateway() {
    let req = url_request(Some(TEST_TOKEN), json!({"url": "https://example.com/cat.jpg"}));
    let (status, body, _) = send(test_app(Some(TEST_TOKEN), true), req).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let detail = body["detail"].as_str().expect("detail string");
    assert!(detail.contains("Invalid credentials"));
}

#[tokio::test]
async fn no_token_configured_allows_anonymous_requests() {
    let req = url_request(None, json!({"url": "https://example.com/cat.jpg"}));
    let (status, body, _) = send(test_app(None, false), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_prediction_shape(&body);
}
