use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reqlog_core::error::CaptureError;

use crate::response::FailureResponse;

/// Application-level error type for the capture handler.
///
/// Every variant renders as `{ "success": false, "error": ... }` with a
/// fixed, generic message; internal details only ever reach the log.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The capture pipeline could not persist the request.
    #[error(transparent)]
    Capture(#[from] CaptureError),

    /// The request body could not be parsed.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            // Already logged by the pipeline.
            AppError::Capture(_) => internal_error_response(),
            AppError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Rejected request");
                (
                    StatusCode::BAD_REQUEST,
                    axum::Json(FailureResponse::new("Bad Request")),
                )
                    .into_response()
            }
        }
    }
}

/// The uniform 500 response. Never carries internal error detail.
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(FailureResponse::new("Internal Server Error")),
    )
        .into_response()
}
