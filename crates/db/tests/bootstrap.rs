//! Database bootstrap against a live PostgreSQL server.
//!
//! Run with `cargo test -p reqlog-db -- --ignored`.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, Connection};

// ---------------------------------------------------------------------------
// Test: ensure_database creates a missing database exactly once
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn ensure_database_creates_missing_database(
    _pool_options: PgPoolOptions,
    options: PgConnectOptions,
) {
    let name = format!("reqlog_bootstrap_{}", std::process::id());
    let target = options.clone().database(&name);

    assert!(reqlog_db::ensure_database(&target).await.unwrap());
    assert!(!reqlog_db::ensure_database(&target).await.unwrap());

    let mut conn = target.connect().await.unwrap();
    let current: String = sqlx::query_scalar("SELECT current_database()")
        .fetch_one(&mut conn)
        .await
        .unwrap();
    assert_eq!(current, name);
    conn.close().await.unwrap();

    let mut admin = options.connect().await.unwrap();
    sqlx::query(&format!("DROP DATABASE \"{name}\""))
        .execute(&mut admin)
        .await
        .unwrap();
}

