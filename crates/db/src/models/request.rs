//! Captured request row model.

use reqlog_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RequestRecord {
    pub id: DbId,
    pub method: String,
    pub url: String,
    pub path: String,
    pub headers: serde_json::Value,
    pub body: serde_json::Value,
    pub received_at: Timestamp,
    pub created_at: Timestamp,
}
