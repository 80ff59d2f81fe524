//! JSON response bodies.
//!
//! Every response carries a `success` flag: captured requests are echoed back
//! through [`CaptureResponse`], failures use [`FailureResponse`].

use reqlog_core::request::{CapturedRequest, Headers};
use serde::Serialize;
use serde_json::Value;

/// Echo of a successfully captured request.
#[derive(Debug, Serialize)]
pub struct CaptureResponse {
    pub success: bool,
    pub method: String,
    pub url: String,
    pub path: String,
    pub headers: Headers,
    pub body: Value,
}

impl From<CapturedRequest> for CaptureResponse {
    fn from(request: CapturedRequest) -> Self {
        Self {
            success: true,
            method: request.method,
            url: request.url,
            path: request.path,
            headers: request.headers,
            body: request.body,
        }
    }
}

/// `{ "success": false, "error": ... }` failure envelope.
#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: &'static str,
}

impl FailureResponse {
    pub fn new(error: &'static str) -> Self {
        Self {
            success: false,
            error,
        }
    }
}
