//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Gateway configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `"json"` for structured output, anything else for text
/// - `DATABASE_URL`: SQLite animal database (default: `"sqlite://animals.db"`)
/// - `ADOPTION_SERVICE_URL`: adoption service base URL
///   (default: `"http://localhost:4000"`)
/// - `ADOPTION_SERVICE_TIMEOUT_SECS`: bound on the adoption call; unset or
///   `0` means wait indefinitely
/// - `STATIC_DIR`: frontend assets (default: `"frontend"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub json_logs: bool,
    pub database_url: String,
    pub adoption_service_url: String,
    pub adoption_service_timeout: Option<Duration>,
    pub static_dir: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            json_logs: lookup("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json")),
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            adoption_service_url: lookup("ADOPTION_SERVICE_URL")
                .unwrap_or(defaults.adoption_service_url),
            adoption_service_timeout: lookup("ADOPTION_SERVICE_TIMEOUT_SECS")
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            json_logs: false,
            database_url: "sqlite://animals.db".to_string(),
            adoption_service_url: "http://localhost:4000".to_string(),
            adoption_service_timeout: None,
            static_dir: PathBuf::from("frontend"),
        }
    }
}
