//! Configuration handling for the service.
//!
//! Everything is read from environment variables with development defaults.
//! Only the composing binary reads the configuration; extractors receive an
//! already-built HTTP client and never look at the environment themselves.

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Environment variable names. Public so tests and tooling can refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_HTTP_CONNECT_TIMEOUT_SECS: &str = "HTTP_CONNECT_TIMEOUT_SECS";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
pub const ENV_HTTP_MAX_REDIRECTS: &str = "HTTP_MAX_REDIRECTS";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Settings for the shared outbound HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub connect_timeout: Duration,
    /// Whole-request deadline applied to every outbound call.
    pub timeout: Duration,
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    http: HttpConfig,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(bind_addr: impl Into<String>, http: HttpConfig) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            http,
        }
    }

    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let connect_timeout = parse_var(ENV_HTTP_CONNECT_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS)?;
        let timeout = parse_var(ENV_HTTP_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS)?;
        let max_redirects = parse_var(ENV_HTTP_MAX_REDIRECTS, DEFAULT_MAX_REDIRECTS)?;

        if timeout == 0 {
            return Err(ConfigError::InvalidValue {
                field: ENV_HTTP_TIMEOUT_SECS,
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            bind_addr,
            http: HttpConfig {
                connect_timeout: Duration::from_secs(connect_timeout),
                timeout: Duration::from_secs(timeout),
                max_redirects,
            },
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }

    /// Outbound HTTP client settings.
    pub fn http(&self) -> &HttpConfig {
        &self.http
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_BIND_ADDR, HttpConfig::default())
    }
}

fn parse_var<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            field: key,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
