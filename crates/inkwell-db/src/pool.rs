//! Connection pool creation and configuration.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use thiserror::Error;

/// Environment variable holding the PostgreSQL connection string.
pub const DATABASE_URL_ENV: &str = "POSTGRES_URL";

/// Runtime tunables for PostgreSQL connection behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbRuntimeSettings {
    /// Maximum number of pooled connections.
    pub max_connections: u32,

    /// How long a query waits for a pooled connection, in seconds.
    pub acquire_timeout_secs: u64,

    /// `sslmode` appended when the connection string carries none.
    pub ssl_mode: String,
}

impl Default for DbRuntimeSettings {
    fn default() -> Self {
        Self {
            max_connections: 8,
            acquire_timeout_secs: 5,
            ssl_mode: "require".to_string(),
        }
    }
}

/// A type alias for the PostgreSQL connection pool.
pub type DbPool = PgPool;

/// Errors that can occur when creating the database pool.
#[derive(Debug, Error)]
pub enum PoolError {
    /// No connection string was configured.
    #[error("POSTGRES_URL is not set")]
    MissingUrl,

    /// The connection string does not use a PostgreSQL scheme.
    #[error("POSTGRES_URL must be a valid postgres:// or postgresql:// URL")]
    InvalidScheme,

    /// The configured `sslmode` is not one PostgreSQL understands.
    #[error("unsupported sslmode '{0}'")]
    InvalidSslMode(String),

    /// The connection string could not be parsed.
    #[error("invalid database URL: {0}")]
    InvalidUrl(#[source] sqlx::Error),
}

/// Validates a connection string and attaches the TLS parameter.
///
/// The URL must start with `postgres://` or `postgresql://`. When it has no
/// `sslmode=` parameter, `sslmode={ssl_mode}` is appended. The value
/// `no-verify` (accepted by some Node drivers) is rewritten to `require`,
/// which likewise encrypts without verifying the server certificate.
///
/// # Errors
///
/// Returns `PoolError::MissingUrl` for an empty string,
/// `PoolError::InvalidScheme` for any other scheme, and
/// `PoolError::InvalidSslMode` for an unknown `ssl_mode`.
pub fn resolve_connection_string(url: &str, ssl_mode: &str) -> Result<String, PoolError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(PoolError::MissingUrl);
    }
    if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
        return Err(PoolError::InvalidScheme);
    }

    if url.contains("sslmode=no-verify") {
        return Ok(url.replace("sslmode=no-verify", "sslmode=require"));
    }
    if url.contains("sslmode=") {
        return Ok(url.to_string());
    }

    let ssl_mode = normalize_ssl_mode(ssl_mode)?;
    let separator = if url.contains('?') { '&' } else { '?' };
    Ok(format!("{url}{separator}sslmode={ssl_mode}"))
}

fn normalize_ssl_mode(ssl_mode: &str) -> Result<&str, PoolError> {
    let ssl_mode = ssl_mode.trim();
    if ssl_mode == "no-verify" {
        return Ok("require");
    }
    PgSslMode::from_str(ssl_mode).map_err(|_| PoolError::InvalidSslMode(ssl_mode.to_string()))?;
    Ok(ssl_mode)
}

/// Creates a new PostgreSQL connection pool.
///
/// The pool opens connections on demand; no connection is attempted here.
/// Each query acquires a connection for one round trip and returns it to
/// the pool when the guard drops, whether the query succeeded or not.
///
/// # Errors
///
/// Returns a `PoolError` if the connection string is missing, uses the
/// wrong scheme, or cannot be parsed.
pub fn create_pool(url: &str, settings: &DbRuntimeSettings) -> Result<DbPool, PoolError> {
    let resolved = resolve_connection_string(url, &settings.ssl_mode)?;
    let options = PgConnectOptions::from_str(&resolved).map_err(PoolError::InvalidUrl)?;

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect_lazy_with(options);

    tracing::debug!(
        max_connections = settings.max_connections,
        acquire_timeout_secs = settings.acquire_timeout_secs,
        "created lazy postgres pool"
    );

    Ok(pool)
}
