#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use landing_api::auth::jwt::JwtConfig;
use landing_api::config::ServerConfig;
use landing_api::router::build_app_router;
use landing_api::state::AppState;
use landing_core::roles::{ROLE_ADMIN, ROLE_VIEWER};
use landing_store::{RowStore, StoreConfig};

const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` whose store files live in `dir`.
pub fn test_config(dir: &TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_cards: 6,
        store: StoreConfig::in_dir(dir.path()),
        jwt: test_jwt(),
    }
}

/// Build the full application router, backed by a fresh store in `dir`.
///
/// The router is `Clone`; clone it for each request sent with `oneshot`.
pub fn build_test_app(dir: &TempDir) -> Router {
    let config = test_config(dir);
    let state = AppState {
        store: Arc::new(RowStore::open(config.store.clone())),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub fn admin_token() -> String {
    token_for("admin-1", ROLE_ADMIN)
}

pub fn viewer_token() -> String {
    token_for("viewer-1", ROLE_VIEWER)
}

fn test_jwt() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        token_ttl_mins: 15,
    }
}

fn token_for(subject: &str, role: &str) -> String {
    test_jwt().issue(subject, role).unwrap()
}

/// Send one request through the router.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_as(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Send a body that is not valid JSON.
pub async fn post_raw(app: Router, uri: &str, token: &str, raw: &'static str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(raw))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A minimal valid create payload.
pub fn row_payload(title: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "cards": [{ "title": "Card 1", "linkUrl": "https://example.com/a" }],
    })
}
