//! [`CaptureStore`] backed by the PostgreSQL pool.

use async_trait::async_trait;
use reqlog_core::error::StoreError;
use reqlog_core::request::NewRequestRecord;
use reqlog_core::store::CaptureStore;
use reqlog_core::types::RecordId;

use crate::repositories::{AppLogRepo, RequestRepo};
use crate::DbPool;

/// SQLSTATE class for data exceptions (bad encoding, out-of-range values...).
const DATA_EXCEPTION_CLASS: &str = "22";

/// SQLSTATE class for integrity constraint violations.
const INTEGRITY_CONSTRAINT_CLASS: &str = "23";

/// Writes captured requests and failure notes through the shared pool.
///
/// The pool is created by the process entry point and handed in here; this
/// type never opens or closes it.
#[derive(Clone)]
pub struct PgCaptureStore {
    pool: DbPool,
}

impl PgCaptureStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl CaptureStore for PgCaptureStore {
    async fn insert_request(&self, record: &NewRequestRecord) -> Result<RecordId, StoreError> {
        RequestRepo::insert(&self.pool, record)
            .await
            .map_err(classify_sqlx_error)
    }

    async fn insert_log_entry(
        &self,
        message: &str,
        detail: Option<&str>,
    ) -> Result<(), StoreError> {
        AppLogRepo::insert(&self.pool, message, detail)
            .await
            .map(|_| ())
            .map_err(classify_sqlx_error)
    }
}

/// Classify a sqlx error into a driver-agnostic [`StoreError`].
///
/// - Pool, I/O, TLS and protocol failures map to `Connectivity`.
/// - SQLSTATE class 23 maps to `Constraint`.
/// - SQLSTATE class 22 and encode/decode failures map to `Serialization`.
/// - Everything else maps to `Query`.
pub fn classify_sqlx_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::WorkerCrashed => StoreError::Connectivity(err.to_string()),
        sqlx::Error::Database(db_err)
            if db_err
                .code()
                .is_some_and(|code| code.starts_with(INTEGRITY_CONSTRAINT_CLASS)) =>
        {
            StoreError::Constraint(db_err.message().to_string())
        }
        sqlx::Error::Database(db_err)
            if db_err
                .code()
                .is_some_and(|code| code.starts_with(DATA_EXCEPTION_CLASS)) =>
        {
            StoreError::Serialization(db_err.message().to_string())
        }
        sqlx::Error::Encode(_) | sqlx::Error::Decode(_) | sqlx::Error::ColumnDecode { .. } => {
            StoreError::Serialization(err.to_string())
        }
        _ => StoreError::Query(err.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
