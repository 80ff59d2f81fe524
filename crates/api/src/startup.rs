//! Store bootstrap run before the listener binds.

use reqlog_db::{DbPool, StartupError};
use sqlx::postgres::PgConnectOptions;

use crate::config::{ConfigError, DatabaseConfig};

/// Anything that stops the store from being ready at startup.
#[derive(Debug, thiserror::Error)]
pub enum PrepareError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StartupError),
}

/// Resolve connect options from `config`, then bring the store up.
///
/// On success the database exists, the pool answers a health check and
/// every migration has been applied.
pub async fn prepare_store(config: &DatabaseConfig) -> Result<DbPool, PrepareError> {
    let options = config.connect_options()?;
    Ok(prepare_store_with(options, config).await?)
}

/// Bring the store up with already-resolved connect options.
pub async fn prepare_store_with(
    options: PgConnectOptions,
    config: &DatabaseConfig,
) -> Result<DbPool, StartupError> {
    if config.create_database {
        reqlog_db::ensure_database(&options).await?;
    }

    let pool =
        reqlog_db::create_pool(options, config.max_connections, config.acquire_timeout).await?;
    tracing::info!("Database connection pool created");

    reqlog_db::health_check(&pool).await?;
    tracing::info!("Database health check passed");

    reqlog_db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}
