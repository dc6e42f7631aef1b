//! Server configuration loading from file and environment variables.

use inkwell_db::DbRuntimeSettings;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Site identity used for page metadata.
    #[serde(default)]
    pub site: SiteConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string. Usually supplied via `POSTGRES_URL`.
    #[serde(default)]
    pub url: Option<String>,

    /// `sslmode` appended when the URL has none.
    #[serde(default = "default_ssl_mode")]
    pub ssl_mode: String,

    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds a query waits for a pooled connection.
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,

    /// Whether to apply pending migrations at startup.
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "inkwell_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// Site identity rendered into page metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_name")]
    pub name: String,

    #[serde(default = "default_site_description")]
    pub description: String,

    /// Public base URL, without a trailing slash.
    #[serde(default = "default_site_url")]
    pub url: String,

    /// Path or URL of the default social preview image.
    #[serde(default = "default_og_image")]
    pub og_image: String,

    #[serde(default)]
    pub twitter_handle: Option<String>,

    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    3000
}

fn default_ssl_mode() -> String {
    DbRuntimeSettings::default().ssl_mode
}

fn default_max_connections() -> u32 {
    DbRuntimeSettings::default().max_connections
}

fn default_acquire_timeout_secs() -> u64 {
    DbRuntimeSettings::default().acquire_timeout_secs
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_site_name() -> String {
    "Inkwell".to_string()
}

fn default_site_description() -> String {
    "A minimal blog listing published articles from a community of writers.".to_string()
}

fn default_site_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_og_image() -> String {
    "/images/og-image.webp".to_string()
}

fn default_keywords() -> Vec<String> {
    ["blog", "articles", "rust", "postgresql"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            ssl_mode: default_ssl_mode(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
            run_migrations: true,
        }
    }
}

impl DatabaseConfig {
    /// Pool tunables for [`inkwell_db::create_pool`].
    pub fn runtime_settings(&self) -> DbRuntimeSettings {
        DbRuntimeSettings {
            max_connections: self.max_connections,
            acquire_timeout_secs: self.acquire_timeout_secs,
            ssl_mode: self.ssl_mode.clone(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            description: default_site_description(),
            url: default_site_url(),
            og_image: default_og_image(),
            twitter_handle: None,
            keywords: default_keywords(),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Picks the config file path: first CLI argument, then
/// `INKWELL_CONFIG_PATH`, then none. Returns the path and where it came from.
pub fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("INKWELL_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `INKWELL_HOST` overrides `server.host`
/// - `INKWELL_PORT` overrides `server.port`
/// - `POSTGRES_URL` overrides `database.url`
/// - `INKWELL_DATABASE_URL` overrides both of the above
/// - `INKWELL_DB_SSL_MODE` overrides `database.ssl_mode`
/// - `INKWELL_DB_MAX_CONNECTIONS` overrides `database.max_connections`
/// - `INKWELL_LOG_LEVEL` overrides `logging.level`
/// - `INKWELL_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `INKWELL_SITE_URL` overrides `site.url`
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    Ok(apply_env_overrides(config, |key| std::env::var(key).ok()))
}

/// Applies environment overrides read through `lookup`.
pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("INKWELL_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Some(port) = lookup("INKWELL_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Some(url) = lookup(inkwell_db::DATABASE_URL_ENV) {
        config.database.url = Some(url);
    }
    if let Some(url) = lookup("INKWELL_DATABASE_URL") {
        config.database.url = Some(url);
    }
    if let Some(mode) = lookup("INKWELL_DB_SSL_MODE") {
        config.database.ssl_mode = mode;
    }
    if let Some(max) = lookup("INKWELL_DB_MAX_CONNECTIONS") {
        if let Ok(parsed) = max.parse() {
            config.database.max_connections = parsed;
        }
    }
    if let Some(level) = lookup("INKWELL_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("INKWELL_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Some(url) = lookup("INKWELL_SITE_URL") {
        config.site.url = url.trim_end_matches('/').to_string();
    }

    config
}
