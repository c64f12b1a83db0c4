#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use templar_api::config::ServerConfig;
use templar_api::router::build_app_router;
use templar_api::state::AppState;
use templar_core::catalog::Catalog;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        default_actor: "current-user".to_string(),
        seed_demo_data: true,
    }
}

/// Build the full application router around `catalog`, with the same
/// middleware stack production uses.
pub fn build_app_with(catalog: Catalog) -> Router {
    let config = test_config();
    build_app_router(AppState::new(catalog, config.clone()), &config)
}

/// Router backed by the demo catalog (contract types `ct1`, `ct2`;
/// templates `1`, `2`).
pub fn build_test_app() -> Router {
    build_app_with(Catalog::with_demo_data())
}

/// Router backed by an empty catalog.
pub fn build_empty_app() -> Router {
    build_app_with(Catalog::new())
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST JSON on behalf of `email` via the `x-user-email` header.
pub async fn post_json_as(
    app: Router,
    uri: &str,
    email: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-user-email", email)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
