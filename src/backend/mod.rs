//! Backend seam for the three session-affecting exchanges.
//!
//! DESIGN
//! ======
//! `AuthSession` talks to an `Arc<dyn AuthBackend>`, so the HTTP client can be
//! swapped for a scripted backend in tests. Implementations report raw
//! outcomes; deciding what a failure means for session state is the service's
//! job, not the transport's.

pub mod http;

use async_trait::async_trait;

use crate::types::{AuthResult, Credentials, SessionInfo};

pub use http::HttpBackend;

// =============================================================================
// ERROR
// =============================================================================

/// Why an exchange produced no usable body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// No response arrived (connect failure, reset, timeout).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-2xx status.
    #[error("backend responded with status {status}")]
    Response { status: u16, message: Option<String> },

    /// A 2xx body could not be interpreted.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl BackendError {
    /// Message the backend put in a failure body, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Response { message: Some(message), .. } => Some(message),
            _ => None,
        }
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// One round trip per call; no retries, no caching.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// `POST /api/auth/login` with the credentials as the JSON body.
    async fn login(&self, credentials: &Credentials) -> Result<AuthResult, BackendError>;

    /// `POST /api/auth/logout` with an empty body.
    async fn logout(&self) -> Result<AuthResult, BackendError>;

    /// `GET /api/auth/user`.
    async fn session(&self) -> Result<SessionInfo, BackendError>;
}
