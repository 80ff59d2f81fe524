//! Store bootstrap as run by `main` before the listener binds.

use std::collections::HashMap;
use std::time::Duration;

use assert_matches::assert_matches;
use reqlog_api::config::{ConfigError, DatabaseConfig, ServerConfig};
use reqlog_api::startup::{prepare_store, prepare_store_with, PrepareError};
use reqlog_db::StartupError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

fn database_config(vars: &[(&str, &str)]) -> DatabaseConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ServerConfig::from_lookup(|name| vars.get(name).cloned())
        .unwrap()
        .database
}

/// Nothing listens on port 1; connects are refused immediately.
fn unreachable_config(create_database: &str) -> DatabaseConfig {
    database_config(&[
        ("DB_HOST", "127.0.0.1"),
        ("DB_PORT", "1"),
        ("DB_CREATE_DATABASE", create_database),
        ("DB_ACQUIRE_TIMEOUT_SECS", "1"),
    ])
}

// ---------------------------------------------------------------------------
// Test: a malformed DATABASE_URL fails before any connection attempt
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_database_url_is_a_config_error() {
    let config = database_config(&[("DATABASE_URL", "not a url")]);

    let err = prepare_store(&config).await.unwrap_err();

    assert_matches!(err, PrepareError::Config(ConfigError::DatabaseUrl(_)));
}

// ---------------------------------------------------------------------------
// Test: an unreachable server fails during database bootstrap
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_server_fails_database_bootstrap() {
    let config = unreachable_config("true");

    let err = prepare_store(&config).await.unwrap_err();

    assert_matches!(err, PrepareError::Store(StartupError::Connect(_)));
}

// ---------------------------------------------------------------------------
// Test: an unreachable server fails pool creation within the acquire timeout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_server_fails_pool_creation() {
    let config = unreachable_config("false");

    let result = tokio::time::timeout(Duration::from_secs(10), prepare_store(&config))
        .await
        .expect("startup should give up after the acquire timeout");

    assert_matches!(result, Err(PrepareError::Store(StartupError::Connect(_))));
}

// ---------------------------------------------------------------------------
// Test: a reachable server ends up with the full schema
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn reachable_server_is_migrated(_pool_options: PgPoolOptions, options: PgConnectOptions) {
    let config = database_config(&[]);

    let pool = prepare_store_with(options, &config).await.unwrap();

    for table in ["requests", "app_log"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
    pool.close().await;
}
