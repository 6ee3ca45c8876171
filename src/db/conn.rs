//! Database connection handling
//!
//! There is deliberately no pool: each operation opens a fresh connection
//! and closes it before returning, matching the one-connection-per-request
//! resource model. The only blocking beyond a single round-trip is the
//! bounded connect-retry loop, which waits for the database to come up.

use std::time::Duration;

use futures::future::BoxFuture;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, Connection, PgConnection};
use tracing::{debug, warn};

use super::DbError;

const DEFAULT_DATABASE: &str = "learnhub";
const DEFAULT_USER: &str = "postgres";
const DEFAULT_PASSWORD: &str = "1234";
const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;

/// Default number of connection attempts before giving up
const DEFAULT_CONNECT_RETRIES: u32 = 10;

/// Default wait between connection attempts, in seconds
const DEFAULT_RETRY_WAIT_SECS: f64 = 1.0;

/// Connection settings, normally read from the environment once at startup
/// and injected into [`Db::new`].
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub connect_retries: u32,
    pub retry_wait: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_owned(),
            user: DEFAULT_USER.to_owned(),
            password: DEFAULT_PASSWORD.to_owned(),
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            connect_retries: DEFAULT_CONNECT_RETRIES,
            retry_wait: Duration::from_secs_f64(DEFAULT_RETRY_WAIT_SECS),
        }
    }
}

impl DbConfig {
    /// Build a config from `POSTGRES_*` / `DB_CONN_*` environment variables,
    /// falling back to defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let wait_secs: f64 = parse_env("DB_CONN_WAIT", DEFAULT_RETRY_WAIT_SECS);
        Self {
            database: env_or("POSTGRES_DB", DEFAULT_DATABASE),
            user: env_or("POSTGRES_USER", DEFAULT_USER),
            password: env_or("POSTGRES_PASSWORD", DEFAULT_PASSWORD),
            host: env_or("POSTGRES_HOST", DEFAULT_HOST),
            port: parse_env("POSTGRES_PORT", DEFAULT_PORT),
            connect_retries: parse_env("DB_CONN_RETRIES", DEFAULT_CONNECT_RETRIES),
            retry_wait: Duration::try_from_secs_f64(wait_secs)
                .unwrap_or(Duration::from_secs_f64(DEFAULT_RETRY_WAIT_SECS)),
        }
    }

    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Handle for opening database connections.
#[derive(Debug, Clone)]
pub struct Db {
    config: DbConfig,
}

impl Db {
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Open a fresh connection, retrying while the database comes up.
    ///
    /// Sleeps `retry_wait` between attempts; after `connect_retries`
    /// failures returns [`DbError::Unreachable`] carrying the last cause.
    pub async fn acquire(&self) -> Result<PgConnection, DbError> {
        let opts = self.config.connect_options();
        let retries = self.config.connect_retries.max(1);
        let mut attempt = 1;

        loop {
            match opts.connect().await {
                Ok(conn) => return Ok(conn),
                Err(source) if attempt < retries => {
                    warn!(attempt, retries, error = %source, "database connect failed, retrying");
                    tokio::time::sleep(self.config.retry_wait).await;
                    attempt += 1;
                }
                Err(source) => {
                    return Err(DbError::Unreachable {
                        attempts: retries,
                        source,
                    });
                }
            }
        }
    }

    /// Run `op` against a fresh connection, releasing it on every exit path.
    ///
    /// The connection is closed explicitly once `op` resolves; if `op`
    /// panics, dropping the connection closes the socket instead. Multi-step
    /// writes open a transaction on the yielded connection.
    pub async fn with_conn<T, F>(&self, op: F) -> Result<T, DbError>
    where
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, DbError>>,
    {
        let mut conn = self.acquire().await?;
        let result = op(&mut conn).await;
        if let Err(err) = conn.close().await {
            debug!(error = %err, "error closing database connection");
        }
        result
    }
}
