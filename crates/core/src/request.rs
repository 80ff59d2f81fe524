//! Captured-request domain types.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::StoreError;
use crate::types::{RecordId, Timestamp};

/// Request headers in arrival order, keyed by (lowercase) header name.
pub type Headers = IndexMap<String, String>;

/// An inbound HTTP request, normalized and ready to persist.
///
/// Built once per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    /// Path plus query string, exactly as received.
    pub url: String,
    pub headers: Headers,
    /// Parsed JSON body; `{}` when the request carried none.
    pub body: Value,
    pub received_at: Timestamp,
}

impl CapturedRequest {
    /// Copy the request fields verbatim and stamp the capture time.
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        url: impl Into<String>,
        headers: Headers,
        body: Value,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            url: url.into(),
            headers,
            body,
            received_at: chrono::Utc::now(),
        }
    }
}

/// The body used when a request has no (JSON) payload.
pub fn empty_body() -> Value {
    Value::Object(serde_json::Map::new())
}

/// DTO for inserting a row into `requests`.
///
/// Headers and body are already serialized to JSON values so the store only
/// has to bind them.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRequestRecord {
    pub method: String,
    pub path: String,
    pub url: String,
    pub headers: Value,
    pub body: Value,
    pub received_at: Timestamp,
}

impl TryFrom<&CapturedRequest> for NewRequestRecord {
    type Error = StoreError;

    fn try_from(request: &CapturedRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            method: request.method.clone(),
            path: request.path.clone(),
            url: request.url.clone(),
            headers: serde_json::to_value(&request.headers)?,
            body: request.body.clone(),
            received_at: request.received_at,
        })
    }
}

/// A request that made it into the `requests` table.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub id: RecordId,
    pub request: CapturedRequest,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
