#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use reqlog_api::router::build_app_router;
use reqlog_api::state::AppState;
use reqlog_core::pipeline::CapturePipeline;
use reqlog_core::store::CaptureStore;
use reqlog_core::testing::MemoryStore;
use tower::ServiceExt;

/// Build the full application router backed by the given in-memory store.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app(store: &Arc<MemoryStore>) -> Router {
    let store: Arc<dyn CaptureStore> = Arc::clone(store) as Arc<dyn CaptureStore>;
    build_app_router(AppState::new(CapturePipeline::new(store)))
}

/// Send a request through the router and return the response.
pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

/// Send a body-less request with the given method.
pub async fn send_empty(app: Router, method: &str, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send a JSON request with the given method and raw body.
pub async fn send_json(app: Router, method: &str, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
