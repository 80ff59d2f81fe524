//! Repository for the `app_log` table.

use reqlog_core::types::DbId;
use sqlx::PgPool;

use crate::models::app_log::LogEntry;

/// Column list for `app_log` queries.
const COLUMNS: &str = "id, message, detail, created_at";

/// Provides query operations for application log entries.
pub struct AppLogRepo;

impl AppLogRepo {
    /// Append a log entry, returning the generated id.
    pub async fn insert(
        pool: &PgPool,
        message: &str,
        detail: Option<&str>,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar("INSERT INTO app_log (message, detail) VALUES ($1, $2) RETURNING id")
            .bind(message)
            .bind(detail)
            .fetch_one(pool)
            .await
    }

    /// List the most recent log entries, newest first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<LogEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM app_log ORDER BY id DESC LIMIT $1");
        sqlx::query_as::<_, LogEntry>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Count all log entries.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM app_log")
            .fetch_one(pool)
            .await
    }
}
