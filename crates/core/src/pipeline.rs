//! Capture → persist → respond pipeline.
//!
//! [`CapturePipeline::handle`] runs once per inbound request. The primary
//! insert is a plain `Result`; when it fails the pipeline makes exactly one
//! best-effort attempt to record the failure in `app_log`, whose own outcome
//! is logged and then dropped.

use std::sync::Arc;

use crate::error::CaptureError;
use crate::request::{CapturedRequest, NewRequestRecord, RecordedRequest};
use crate::store::CaptureStore;
use crate::types::RecordId;

/// Persists captured requests through an injected [`CaptureStore`].
///
/// Cheap to clone; every clone shares the same store.
#[derive(Clone)]
pub struct CapturePipeline {
    store: Arc<dyn CaptureStore>,
}

impl CapturePipeline {
    pub fn new(store: Arc<dyn CaptureStore>) -> Self {
        Self { store }
    }

    /// Persist `request`, falling back to an `app_log` entry on failure.
    ///
    /// Returns [`CaptureError::RequestPersist`] when the request row could not
    /// be written. The fallback entry has already been attempted by then.
    pub async fn handle(&self, request: CapturedRequest) -> Result<RecordedRequest, CaptureError> {
        tracing::info!(
            method = %request.method,
            path = %request.path,
            url = %request.url,
            body = %request.body,
            "Received request"
        );
        tracing::debug!(headers = ?request.headers, "Request headers");

        match self.persist(&request).await {
            Ok(id) => {
                tracing::debug!(id, "Request recorded");
                Ok(RecordedRequest { id, request })
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    method = %request.method,
                    url = %request.url,
                    "Failed to record request"
                );
                self.record_failure(&err).await;
                Err(err)
            }
        }
    }

    async fn persist(&self, request: &CapturedRequest) -> Result<RecordId, CaptureError> {
        let record = NewRequestRecord::try_from(request).map_err(CaptureError::RequestPersist)?;
        self.store
            .insert_request(&record)
            .await
            .map_err(CaptureError::RequestPersist)
    }

    /// Best-effort `app_log` write. Never retried, never propagated.
    async fn record_failure(&self, err: &CaptureError) {
        let message = err.to_string();
        let detail = err.detail();

        if let Err(log_err) = self
            .store
            .insert_log_entry(&message, Some(&detail))
            .await
            .map_err(CaptureError::LogPersist)
        {
            tracing::error!(
                error = %log_err,
                original_error = %message,
                "Failed to write app_log entry"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
