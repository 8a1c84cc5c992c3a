//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `rfid-api.toml` in the working directory (or the file named by
//! `RFID_CONFIG`). Every field except the API key has a sensible default so
//! the file is optional. Environment variables take precedence over file
//! values. The result is loaded once and never changes while the process
//! runs.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use serde::Deserialize;

use rfid_api_domain::auth::ApiKey;

/// Default config file name, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "rfid-api.toml";

/// Default request body cap: 16 MiB.
const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Credential settings.
    pub auth: AuthConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Tokio worker threads. `None` uses one per CPU.
    pub worker_threads: Option<usize>,
    /// Maximum number of pending connections.
    pub backlog: u32,
    /// Requests running longer than this are answered with 408.
    pub request_timeout_secs: u64,
    /// Largest accepted request body in bytes. `0` removes the cap.
    pub max_body_bytes: usize,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
    /// How long a statement waits on a locked database.
    pub busy_timeout_ms: u64,
}

/// Shared-secret configuration.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Value clients must send in `X-API-Key`. Required.
    pub api_key: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// result is invalid (most notably when no API key is configured).
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("RFID_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("RFID_HOST") {
            self.server.host = val;
        }
        if let Some(port) = lookup("RFID_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = lookup("RFID_BIND") {
            if let Ok(addr) = val.parse::<SocketAddr>() {
                self.server.host = addr.ip().to_string();
                self.server.port = addr.port();
            } else if let Some((host, port)) = val.rsplit_once(':') {
                // Not a socket address; keep the host so validation names it.
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(threads) = lookup("RFID_WORKER_THREADS").and_then(|val| val.parse().ok()) {
            self.server.worker_threads = Some(threads);
        }
        if let Some(backlog) = lookup("RFID_BACKLOG").and_then(|val| val.parse().ok()) {
            self.server.backlog = backlog;
        }
        if let Some(secs) = lookup("RFID_REQUEST_TIMEOUT_SECS").and_then(|val| val.parse().ok()) {
            self.server.request_timeout_secs = secs;
        }
        if let Some(max) = lookup("RFID_MAX_BODY_BYTES").and_then(|val| val.parse().ok()) {
            self.server.max_body_bytes = max;
        }
        if let Some(val) = lookup("RFID_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(ms) = lookup("RFID_BUSY_TIMEOUT_MS").and_then(|val| val.parse().ok()) {
            self.database.busy_timeout_ms = ms;
        }
        // `API_KEY` is the name used by earlier deployments' `.env` files.
        if let Some(val) = lookup("RFID_API_KEY").or_else(|| lookup("API_KEY")) {
            self.auth.api_key = Some(val);
        }
        if let Some(val) = lookup("RFID_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.server.worker_threads == Some(0) {
            return Err(ConfigError::Validation(
                "worker_threads must be non-zero".to_string(),
            ));
        }
        if self.server.backlog == 0 {
            return Err(ConfigError::Validation("backlog must be non-zero".to_string()));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "request_timeout_secs must be non-zero".to_string(),
            ));
        }
        self.socket_addr()?;
        self.api_key()?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when `host` is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.server.host.parse().map_err(|_| {
            ConfigError::Validation(format!("host {:?} is not an IP address", self.server.host))
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Return the `SQLite` busy timeout.
    #[must_use]
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.database.busy_timeout_ms)
    }

    /// Return the per-request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }

    /// Return the request body cap, `None` when disabled.
    #[must_use]
    pub fn max_body_bytes(&self) -> Option<usize> {
        (self.server.max_body_bytes > 0).then_some(self.server.max_body_bytes)
    }

    /// Return the configured API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] when the key is unset or empty.
    pub fn api_key(&self) -> Result<ApiKey, ConfigError> {
        let secret = self.auth.api_key.clone().ok_or(ConfigError::MissingApiKey)?;
        ApiKey::new(secret).map_err(|_| ConfigError::MissingApiKey)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            worker_threads: None,
            backlog: 2048,
            request_timeout_secs: 60,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:rfid_data.db".to_string(),
            busy_timeout_ms: 5000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "rfidd=info,rfid_api=info,tower_http=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// No usable API key; the server refuses to start without one.
    #[error("API key not configured: set RFID_API_KEY (or API_KEY) or auth.api_key")]
    MissingApiKey,
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn with_key() -> Config {
        let mut config = Config::default();
        config.auth.api_key = Some("secret".to_string());
        config
    }

    fn overrides(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.backlog, 2048);
        assert_eq!(config.server.request_timeout_secs, 60);
        assert!(config.server.worker_threads.is_none());
        assert_eq!(config.database.url, "sqlite:rfid_data.db");
        assert_eq!(config.busy_timeout(), Duration::from_secs(5));
        assert!(config.auth.api_key.is_none());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090
            worker_threads = 4
            backlog = 128
            request_timeout_secs = 30
            max_body_bytes = 1024

            [database]
            url = 'sqlite:/var/lib/rfid/data.db'
            busy_timeout_ms = 250

            [auth]
            api_key = 'secret'

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.worker_threads, Some(4));
        assert_eq!(config.server.backlog, 128);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.max_body_bytes(), Some(1024));
        assert_eq!(config.database_url(), "sqlite:/var/lib/rfid/data.db");
        assert_eq!(config.busy_timeout(), Duration::from_millis(250));
        assert_eq!(config.auth.api_key.as_deref(), Some("secret"));
        assert_eq!(config.logging.filter, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn should_refuse_to_start_without_api_key() {
        let config = Config::default();
        assert!(matches!(config.validate(), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn should_refuse_to_start_with_empty_api_key() {
        let mut config = Config::default();
        config.auth.api_key = Some(String::new());
        assert!(matches!(config.validate(), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn should_read_api_key_from_environment() {
        let mut config = Config::default();
        config.apply_overrides(overrides(&[("RFID_API_KEY", "from-env")]));
        assert!(config.api_key().unwrap().verify(Some(b"from-env")));
    }

    #[test]
    fn should_accept_legacy_api_key_variable() {
        let mut config = Config::default();
        config.apply_overrides(overrides(&[("API_KEY", "legacy")]));
        assert!(config.api_key().unwrap().verify(Some(b"legacy")));
    }

    #[test]
    fn should_prefer_prefixed_api_key_variable() {
        let mut config = Config::default();
        config.apply_overrides(overrides(&[("API_KEY", "legacy"), ("RFID_API_KEY", "new")]));
        assert!(config.api_key().unwrap().verify(Some(b"new")));
    }

    #[test]
    fn should_override_bind_address_from_environment() {
        let mut config = with_key();
        config.apply_overrides(overrides(&[("RFID_BIND", "127.0.0.1:8080")]));
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn should_accept_bracketed_ipv6_bind_address() {
        let mut config = with_key();
        config.apply_overrides(overrides(&[("RFID_BIND", "[::1]:8080")]));
        assert_eq!(config.server.host, "::1");
        assert_eq!(config.server.port, 8080);
        assert!(config.validate().is_ok());
        assert_eq!(config.socket_addr().unwrap().to_string(), "[::1]:8080");
    }

    #[test]
    fn should_reject_hostname_bind_address() {
        let mut config = with_key();
        config.apply_overrides(overrides(&[("RFID_BIND", "localhost:8080")]));
        assert_eq!(config.server.host, "localhost");
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_cap_body_size_by_default() {
        let config = Config::default();
        assert_eq!(config.max_body_bytes(), Some(16 * 1024 * 1024));
    }

    #[test]
    fn should_disable_body_cap_when_zero() {
        let mut config = with_key();
        config.apply_overrides(overrides(&[("RFID_MAX_BODY_BYTES", "0")]));
        assert_eq!(config.max_body_bytes(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_override_numeric_settings_from_environment() {
        let mut config = with_key();
        config.apply_overrides(overrides(&[
            ("RFID_WORKER_THREADS", "3"),
            ("RFID_BACKLOG", "64"),
            ("RFID_REQUEST_TIMEOUT_SECS", "10"),
            ("RFID_BUSY_TIMEOUT_MS", "100"),
        ]));
        assert_eq!(config.server.worker_threads, Some(3));
        assert_eq!(config.server.backlog, 64);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.busy_timeout(), Duration::from_millis(100));
    }

    #[test]
    fn should_ignore_unparsable_numeric_override() {
        let mut config = with_key();
        config.apply_overrides(overrides(&[("RFID_PORT", "http")]));
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn should_let_rust_log_win_over_rfid_log() {
        let mut config = with_key();
        config.apply_overrides(overrides(&[("RFID_LOG", "info"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = with_key();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_worker_threads() {
        let mut config = with_key();
        config.server.worker_threads = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_hostname_instead_of_ip() {
        let mut config = with_key();
        config.server.host = "localhost".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_accept_valid_config() {
        assert!(with_key().validate().is_ok());
    }

    #[test]
    fn should_format_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn should_build_ipv6_socket_addr() {
        let mut config = with_key();
        config.server.host = "::1".to_string();
        assert_eq!(config.socket_addr().unwrap().to_string(), "[::1]:5000");
    }

    #[test]
    fn should_not_print_api_key_in_debug_output() {
        let output = format!("{:?}", with_key());
        assert!(!output.contains("secret"));
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
