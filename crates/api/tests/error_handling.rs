//! Tests for the failure paths: store outages and malformed bodies.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{body_json, build_test_app, send_empty, send_json};
use reqlog_api::error::AppError;
use reqlog_core::error::{CaptureError, StoreError};
use reqlog_core::testing::MemoryStore;
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: store unreachable -> generic 500 and one app_log entry
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_failure_returns_generic_500() {
    let store = Arc::new(MemoryStore::unreachable());
    let response = send_json(build_test_app(&store), "POST", "/widgets", r#"{"name":"a"}"#).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json, json!({"success": false, "error": "Internal Server Error"}));

    assert!(store.requests().is_empty());
    assert_eq!(store.log_attempts(), 1);

    let entries = store.log_entries();
    assert_eq!(entries.len(), 1);
    assert!(!entries[0].message.is_empty());
}

// ---------------------------------------------------------------------------
// Test: app_log failure does not change the response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn log_failure_still_returns_generic_500() {
    let store = Arc::new(MemoryStore::unreachable());
    store.set_fail_log_entries(true);

    let response = send_empty(build_test_app(&store), "GET", "/health").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json, json!({"success": false, "error": "Internal Server Error"}));
    assert_eq!(store.log_attempts(), 1);
    assert!(store.log_entries().is_empty());
}

// ---------------------------------------------------------------------------
// Test: 500 body never leaks store detail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn capture_error_response_is_sanitized() {
    let err = AppError::Capture(CaptureError::RequestPersist(StoreError::Connectivity(
        "password authentication failed for user secret_admin".into(),
    )));

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert!(
        !json.to_string().contains("secret_admin"),
        "Internal error response must not leak sensitive details"
    );
    assert_eq!(json["error"], "Internal Server Error");
}

// ---------------------------------------------------------------------------
// Test: malformed JSON is rejected before reaching the store
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_json_returns_400_without_persisting() {
    let store = Arc::new(MemoryStore::new());
    let response = send_json(build_test_app(&store), "POST", "/widgets", r#"{"name":"#).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json, json!({"success": false, "error": "Bad Request"}));

    assert!(store.requests().is_empty());
    assert_eq!(store.log_attempts(), 0);
}
