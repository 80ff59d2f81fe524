//! PostgreSQL persistence for the request logger.
//!
//! Startup helpers (pool, database bootstrap, health check, migrations), row
//! models, repositories, and [`PgCaptureStore`], the [`CaptureStore`]
//! implementation handed to the capture pipeline.
//!
//! [`CaptureStore`]: reqlog_core::store::CaptureStore

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, Connection, PgConnection};

pub mod models;
pub mod repositories;
pub mod store;

pub use store::PgCaptureStore;

pub type DbPool = sqlx::PgPool;

/// Maintenance database used to create the target database.
const MAINTENANCE_DATABASE: &str = "postgres";

/// Errors that abort startup before the listener binds.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Failed to create database '{database}': {source}")]
    CreateDatabase {
        database: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Database health check failed: {0}")]
    HealthCheck(#[source] sqlx::Error),

    #[error("Failed to run database migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Create a connection pool from connect options.
///
/// The first connection is opened eagerly; an unreachable server fails once
/// `acquire_timeout` has elapsed.
pub async fn create_pool(
    options: PgConnectOptions,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<DbPool, StartupError> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect_with(options)
        .await
        .map_err(StartupError::Connect)
}

/// Create the target database if it does not exist yet.
///
/// Connects to the `postgres` maintenance database with the same
/// credentials. Returns `true` when the database was created.
pub async fn ensure_database(options: &PgConnectOptions) -> Result<bool, StartupError> {
    let Some(database) = options.get_database().map(str::to_string) else {
        // No explicit database: the server falls back to the user's own.
        return Ok(false);
    };

    let mut conn = options
        .clone()
        .database(MAINTENANCE_DATABASE)
        .connect()
        .await
        .map_err(StartupError::Connect)?;

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&database)
            .fetch_one(&mut conn)
            .await
            .map_err(StartupError::Connect)?;

    if !exists {
        create_database(&mut conn, &database).await?;
        tracing::info!(%database, "Database created");
    }

    let _ = conn.close().await;
    Ok(!exists)
}

async fn create_database(conn: &mut PgConnection, database: &str) -> Result<(), StartupError> {
    // CREATE DATABASE takes no bind parameters; quote the identifier instead.
    let statement = format!("CREATE DATABASE {}", quote_identifier(database));
    sqlx::query(&statement)
        .execute(conn)
        .await
        .map(|_| ())
        .map_err(|source| StartupError::CreateDatabase {
            database: database.to_string(),
            source,
        })
}

/// Quote a PostgreSQL identifier, doubling embedded quotes.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Verify the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), StartupError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(StartupError::HealthCheck)
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), StartupError> {
    sqlx::migrate!("../../db/migrations").run(pool).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
