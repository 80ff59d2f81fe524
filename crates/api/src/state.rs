use reqlog_core::pipeline::CapturePipeline;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the pipeline holds its store behind an `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Capture pipeline wired to the process-wide store.
    pub pipeline: CapturePipeline,
}

impl AppState {
    pub fn new(pipeline: CapturePipeline) -> Self {
        Self { pipeline }
    }
}
