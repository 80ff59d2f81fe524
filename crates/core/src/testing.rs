//! In-memory [`CaptureStore`] for tests.
//!
//! Enabled for this crate's own tests and, through the `test-util` feature,
//! for downstream integration tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::request::NewRequestRecord;
use crate::store::CaptureStore;
use crate::types::RecordId;

/// A log entry captured by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLogEntry {
    pub message: String,
    pub detail: Option<String>,
}

/// Vec-backed store with switchable failure modes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    requests: Mutex<Vec<NewRequestRecord>>,
    log_entries: Mutex<Vec<MemoryLogEntry>>,
    fail_requests: AtomicBool,
    fail_log_entries: AtomicBool,
    log_attempts: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose request inserts fail with a connectivity error.
    pub fn unreachable() -> Self {
        let store = Self::default();
        store.set_fail_requests(true);
        store
    }

    pub fn set_fail_requests(&self, fail: bool) {
        self.fail_requests.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_log_entries(&self, fail: bool) {
        self.fail_log_entries.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of the persisted request rows, in insertion order.
    pub fn requests(&self) -> Vec<NewRequestRecord> {
        self.requests.lock().unwrap().clone()
    }

    /// Snapshot of the persisted log entries, in insertion order.
    pub fn log_entries(&self) -> Vec<MemoryLogEntry> {
        self.log_entries.lock().unwrap().clone()
    }

    /// Number of `insert_log_entry` calls, successful or not.
    pub fn log_attempts(&self) -> usize {
        self.log_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CaptureStore for MemoryStore {
    async fn insert_request(&self, record: &NewRequestRecord) -> Result<RecordId, StoreError> {
        if self.fail_requests.load(Ordering::SeqCst) {
            return Err(StoreError::Connectivity("connection refused".into()));
        }
        let mut requests = self.requests.lock().unwrap();
        requests.push(record.clone());
        Ok(requests.len() as RecordId)
    }

    async fn insert_log_entry(
        &self,
        message: &str,
        detail: Option<&str>,
    ) -> Result<(), StoreError> {
        self.log_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_log_entries.load(Ordering::SeqCst) {
            return Err(StoreError::Connectivity("connection refused".into()));
        }
        self.log_entries.lock().unwrap().push(MemoryLogEntry {
            message: message.to_string(),
            detail: detail.map(str::to_string),
        });
        Ok(())
    }
}
