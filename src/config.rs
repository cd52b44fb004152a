//! Client configuration parsed from environment variables.

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors produced while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric variable held something other than an unsigned integer.
    #[error("invalid value for {var}: {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    /// The login path must be an absolute route path.
    #[error("login path must start with '/': {0:?}")]
    InvalidLoginPath(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin without a trailing slash.
    pub base_url: String,
    /// Where the guard sends unauthenticated navigations.
    pub login_path: String,
    pub timeouts: Timeouts,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_owned(), login_path: DEFAULT_LOGIN_PATH.to_owned(), timeouts: Timeouts::default() }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `ATHENAEUM_BASE_URL`: default `http://127.0.0.1:8080`
    /// - `ATHENAEUM_LOGIN_PATH`: default `/login`
    /// - `ATHENAEUM_REQUEST_TIMEOUT_SECS`: default 30
    /// - `ATHENAEUM_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout is not an unsigned integer or the login
    /// path is not absolute.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("ATHENAEUM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let login_path = std::env::var("ATHENAEUM_LOGIN_PATH").unwrap_or_else(|_| DEFAULT_LOGIN_PATH.to_owned());
        let timeouts = Timeouts {
            request_secs: env_parse_u64("ATHENAEUM_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse_u64("ATHENAEUM_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };
        Self::default().with_base_url(&base_url).with_login_path(&login_path).map(|cfg| Self { timeouts, ..cfg })
    }

    /// Replace the backend origin, trimming trailing slashes.
    #[must_use]
    pub fn with_base_url(self, base_url: &str) -> Self {
        Self { base_url: base_url.trim().trim_end_matches('/').to_owned(), ..self }
    }

    /// Replace the guard's redirect target.
    ///
    /// # Errors
    ///
    /// Returns an error unless the path starts with `/`.
    pub fn with_login_path(self, login_path: &str) -> Result<Self, ConfigError> {
        let login_path = login_path.trim();
        if !login_path.starts_with('/') {
            return Err(ConfigError::InvalidLoginPath(login_path.to_owned()));
        }
        Ok(Self { login_path: login_path.to_owned(), ..self })
    }
}

fn env_parse_u64(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber { var: key, value: raw }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
