//! Domain layer for the request logger.
//!
//! Holds the captured-request types, the [`store::CaptureStore`] seam the
//! persistence layer implements, and the [`pipeline::CapturePipeline`] that
//! every inbound HTTP request is funnelled through. Nothing here knows about
//! HTTP or SQL.

pub mod error;
pub mod pipeline;
pub mod request;
pub mod store;
pub mod types;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;
