//! The catch-all capture handler.
//!
//! Every method on every path lands here. The handler turns the raw request
//! into a [`CapturedRequest`], runs it through the pipeline and echoes it back.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, Uri};
use axum::Json;
use reqlog_core::request::{empty_body, CapturedRequest, Headers};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::response::CaptureResponse;
use crate::state::AppState;

/// Deepest array/object nesting accepted in a JSON body.
///
/// serde_json's own limit (128) is lifted; this one keeps the recursive
/// parse, serialization and drop of the value well inside a worker stack.
pub const MAX_BODY_DEPTH: usize = 512;

/// ANY /{*path} -- capture, persist and echo the request.
pub async fn capture_request(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<CaptureResponse>> {
    let body = parse_body(&headers, &body)?;
    let request = CapturedRequest::new(
        method.as_str(),
        uri.path(),
        request_url(&uri),
        collect_headers(&headers),
        body,
    );

    let recorded = state.pipeline.handle(request).await?;
    Ok(Json(CaptureResponse::from(recorded.request)))
}

/// Path plus query string, as sent by the client.
pub fn request_url(uri: &Uri) -> &str {
    uri.path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path())
}

/// Flatten the header map, joining repeated names with `", "`.
pub fn collect_headers(headers: &HeaderMap) -> Headers {
    headers
        .keys()
        .map(|name| {
            let value = headers
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()))
                .collect::<Vec<_>>()
                .join(", ");
            (name.as_str().to_string(), value)
        })
        .collect()
}

/// Parse the body as JSON when the content type says so.
///
/// Anything else, and an empty JSON body, becomes `{}`.
pub fn parse_body(headers: &HeaderMap, body: &[u8]) -> AppResult<Value> {
    if !is_json_content_type(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(empty_body());
    }

    let depth = nesting_depth(body);
    if depth > MAX_BODY_DEPTH {
        return Err(AppError::BadRequest(format!(
            "JSON body nests {depth} levels deep, limit is {MAX_BODY_DEPTH}"
        )));
    }

    let malformed = |e: serde_json::Error| AppError::BadRequest(format!("Malformed JSON body: {e}"));
    let mut de = serde_json::Deserializer::from_slice(body);
    de.disable_recursion_limit();
    let value = Value::deserialize(&mut de).map_err(malformed)?;
    de.end().map_err(malformed)?;
    Ok(value)
}

/// Maximum `[`/`{` nesting outside string literals.
///
/// Only an upper bound for malformed input; the parser reports those.
fn nesting_depth(body: &[u8]) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for &byte in body {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                max = max.max(depth);
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

/// `application/json` or any `application/*+json` media type.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
