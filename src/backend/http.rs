//! reqwest implementation of the backend contract.
//!
//! Session identity rides entirely on the backend's cookie, so the client is
//! always built with a cookie store; there is no switch to turn it off.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{AuthBackend, BackendError};
use crate::config::ClientConfig;
use crate::types::{AuthResult, Credentials, SessionInfo};

pub const LOGIN_ENDPOINT: &str = "/api/auth/login";
pub const LOGOUT_ENDPOINT: &str = "/api/auth/logout";
pub const SESSION_ENDPOINT: &str = "/api/auth/user";

/// HTTP client bound to one backend origin and one cookie jar.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| BackendError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        endpoint_url(&self.base_url, endpoint)
    }
}

#[async_trait]
impl AuthBackend for HttpBackend {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResult, BackendError> {
        let resp = self
            .http
            .post(self.url(LOGIN_ENDPOINT))
            .json(credentials)
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        read_json(resp).await
    }

    async fn logout(&self) -> Result<AuthResult, BackendError> {
        let resp = self
            .http
            .post(self.url(LOGOUT_ENDPOINT))
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        let body = read_body(resp).await?;
        if body.trim().is_empty() {
            return Ok(AuthResult { success: true, ..AuthResult::default() });
        }
        parse_body(&body)
    }

    async fn session(&self) -> Result<SessionInfo, BackendError> {
        let resp = self
            .http
            .get(self.url(SESSION_ENDPOINT))
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        read_json(resp).await
    }
}

// =============================================================================
// RESPONSE HANDLING
// =============================================================================

#[derive(Deserialize)]
struct FailureBody {
    message: Option<String>,
}

pub(crate) fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!("{}{endpoint}", base_url.trim_end_matches('/'))
}

/// Pull a non-empty `message` out of a failure body.
pub(crate) fn failure_message(body: &str) -> Option<String> {
    serde_json::from_str::<FailureBody>(body)
        .ok()
        .and_then(|b| b.message)
        .map(|m| m.trim().to_owned())
        .filter(|m| !m.is_empty())
}

pub(crate) fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, BackendError> {
    serde_json::from_str(body).map_err(|e| BackendError::Parse(e.to_string()))
}

/// Body text of a 2xx response; any other status becomes `BackendError::Response`.
async fn read_body(resp: reqwest::Response) -> Result<String, BackendError> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| BackendError::Request(e.to_string()))?;
    if !status.is_success() {
        return Err(BackendError::Response { status: status.as_u16(), message: failure_message(&body) });
    }
    Ok(body)
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, BackendError> {
    let body = read_body(resp).await?;
    parse_body(&body)
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
