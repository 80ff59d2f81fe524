//! Application log row model.

use reqlog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `app_log` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LogEntry {
    pub id: DbId,
    pub message: String,
    /// Error source chain, when one was available.
    pub detail: Option<String>,
    pub created_at: Timestamp,
}
