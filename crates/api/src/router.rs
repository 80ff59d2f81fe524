//! Shared application router builder.
//!
//! Provides [`build_app_router`] so both the production binary (`main.rs`)
//! and integration tests use the exact same middleware stack.

use std::any::Any;

use axum::extract::DefaultBodyLimit;
use axum::response::Response;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::capture;
use crate::error::internal_error_response;
use crate::state::AppState;

/// Build the full application [`Router`] with all middleware layers.
///
/// There are no routes: every method and path falls through to
/// [`capture::capture_request`]. The middleware stack is applied bottom-up:
///
/// 1. Structured request/response tracing
/// 2. Panic recovery (catch panics, return the uniform 500)
/// 3. Body size limit removed
pub fn build_app_router(state: AppState) -> Router {
    Router::new()
        .fallback(capture::capture_request)
        // -- Middleware stack (applied bottom-up) --
        .layer(DefaultBodyLimit::disable())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Handler panicked");
    internal_error_response()
}
