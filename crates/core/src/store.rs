//! The persistence seam consumed by the capture pipeline.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::request::NewRequestRecord;
use crate::types::RecordId;

/// Append-only store for captured requests and failure notes.
///
/// Implementations own their connection lifecycle and must be safe to share
/// across concurrently running request tasks.
#[async_trait]
pub trait CaptureStore: Send + Sync {
    /// Insert one row into `requests` and return its id.
    async fn insert_request(&self, record: &NewRequestRecord) -> Result<RecordId, StoreError>;

    /// Insert one row into `app_log`.
    async fn insert_log_entry(&self, message: &str, detail: Option<&str>)
        -> Result<(), StoreError>;
}
