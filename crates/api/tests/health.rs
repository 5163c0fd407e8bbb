//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
};
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};
use tempfile::TempDir;
use tower::ServiceExt;

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir);

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["store_healthy"], true);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir);

    let response = get(app, "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir);

    let response = get(app, "/health").await;
    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("response must carry x-request-id");

    // UUID v4 text form.
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

async fn preflight(app: axum::Router, origin: &str) -> axum::response::Response {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/admin/landing-rows")
        .header(ORIGIN, origin)
        .header(ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

#[tokio::test]
async fn cors_preflight_allows_only_configured_origins() {
    let dir = TempDir::new().unwrap();
    let app = common::build_test_app(&dir);

    let allowed = preflight(app.clone(), "http://localhost:5173").await;
    assert_eq!(
        allowed.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:5173"
    );

    let foreign = preflight(app, "https://elsewhere.example").await;
    assert!(foreign.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
