use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

/// Configuration errors detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("DATABASE_URL is not a valid PostgreSQL URL: {0}")]
    DatabaseUrl(#[source] sqlx::Error),
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3030`).
    pub port: u16,
    pub database: DatabaseConfig,
}

/// Connection settings for the PostgreSQL store.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Full connection URL. Takes precedence over the individual parts.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    /// How long startup waits for the first pooled connection.
    pub acquire_timeout: Duration,
    /// Create the database on startup when it does not exist.
    pub create_database: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default          |
    /// |---------------------------|------------------|
    /// | `HOST`                    | `0.0.0.0`        |
    /// | `PORT`                    | `3030`           |
    /// | `DATABASE_URL`            | unset            |
    /// | `DB_HOST`                 | `localhost`      |
    /// | `DB_PORT`                 | `5432`           |
    /// | `DB_USER`                 | `postgres`       |
    /// | `DB_PASSWORD`             | empty            |
    /// | `DB_NAME`                 | `request_logger` |
    /// | `DB_MAX_CONNECTIONS`      | `10`             |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `30`             |
    /// | `DB_CREATE_DATABASE`      | `true`           |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            host: var("DB_HOST", "localhost"),
            port: parse("DB_PORT", var("DB_PORT", "5432"), "u16")?,
            user: var("DB_USER", "postgres"),
            password: var("DB_PASSWORD", ""),
            name: var("DB_NAME", "request_logger"),
            max_connections: parse(
                "DB_MAX_CONNECTIONS",
                var("DB_MAX_CONNECTIONS", "10"),
                "u32",
            )?,
            acquire_timeout: Duration::from_secs(parse(
                "DB_ACQUIRE_TIMEOUT_SECS",
                var("DB_ACQUIRE_TIMEOUT_SECS", "30"),
                "u64",
            )?),
            create_database: parse_bool("DB_CREATE_DATABASE", var("DB_CREATE_DATABASE", "true"))?,
        };

        Ok(Self {
            host: var("HOST", "0.0.0.0"),
            port: parse("PORT", var("PORT", "3030"), "u16")?,
            database,
        })
    }
}

impl DatabaseConfig {
    /// Build sqlx connect options from the URL or the individual parts.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url).map_err(ConfigError::DatabaseUrl);
        }

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.name);
        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        Ok(options)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("create_database", &self.create_database)
            .finish()
    }
}

fn parse<T: FromStr>(
    var: &'static str,
    value: String,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        expected,
        value,
    })
}

fn parse_bool(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            expected: "boolean",
            value,
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
