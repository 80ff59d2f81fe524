//! Repository for the `requests` table.

use reqlog_core::request::NewRequestRecord;
use reqlog_core::types::DbId;
use sqlx::PgPool;

use crate::models::request::RequestRecord;

/// Column list for `requests` queries.
const COLUMNS: &str = "id, method, url, path, headers, body, received_at, created_at";

/// Provides query operations for captured requests.
pub struct RequestRepo;

impl RequestRepo {
    /// Insert a captured request, returning the generated id.
    ///
    /// Headers and body are bound as JSON text and cast to `json`, which
    /// stores them verbatim (including `\u0000` escapes `jsonb` rejects).
    pub async fn insert(pool: &PgPool, record: &NewRequestRecord) -> Result<DbId, sqlx::Error> {
        let headers = to_json_text(&record.headers)?;
        let body = to_json_text(&record.body)?;

        sqlx::query_scalar(
            "INSERT INTO requests (method, url, path, headers, body, received_at) \
             VALUES ($1, $2, $3, $4::json, $5::json, $6) \
             RETURNING id",
        )
        .bind(&record.method)
        .bind(&record.url)
        .bind(&record.path)
        .bind(headers)
        .bind(body)
        .bind(record.received_at)
        .fetch_one(pool)
        .await
    }

    /// Find a captured request by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RequestRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM requests WHERE id = $1");
        sqlx::query_as::<_, RequestRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the most recent captured requests, newest first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<RequestRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM requests ORDER BY id DESC LIMIT $1");
        sqlx::query_as::<_, RequestRecord>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Count all captured requests.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM requests")
            .fetch_one(pool)
            .await
    }
}

fn to_json_text(value: &serde_json::Value) -> Result<String, sqlx::Error> {
    serde_json::to_string(value).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}
