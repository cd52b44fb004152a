//! Auth session service: login, logout, and live session checks.
//!
//! SYSTEM CONTEXT
//! ==============
//! The only writer of `SessionStore`. Views call `login`/`logout`; the
//! navigation guard calls `check_auth_status` through the `AuthStatus` trait.
//!
//! ERROR HANDLING
//! ==============
//! No backend failure escapes: every exchange resolves to a plain result and a
//! conservative store update. After a transport failure the store is never
//! left authenticated. Nothing is retried; callers re-invoke if they want to.
//!
//! CONCURRENCY
//! ===========
//! Store writes happen when an exchange completes, so concurrent exchanges
//! resolve last-completed-wins. Dropping an operation's future before the
//! response arrives skips its write. `shutdown` cancels everything in flight.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::backend::{AuthBackend, BackendError};
use crate::store::SessionStore;
use crate::types::{AuthResult, Credentials, SessionInfo};

pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";
pub const LOGOUT_FAILED_MESSAGE: &str = "Logout failed, but local session cleared.";

/// Live "is this session still valid" check, as seen by route guards.
#[async_trait]
pub trait AuthStatus: Send + Sync {
    async fn check_auth_status(&self) -> bool;
}

/// Orchestrates the session exchanges and keeps the store in step with the backend.
pub struct AuthSession {
    backend: Arc<dyn AuthBackend>,
    store: Arc<SessionStore>,
    shutdown: CancellationToken,
}

impl AuthSession {
    #[must_use]
    pub fn new(backend: Arc<dyn AuthBackend>, store: Arc<SessionStore>) -> Self {
        Self { backend, store, shutdown: CancellationToken::new() }
    }

    /// Read view of the store this service writes.
    #[must_use]
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Cancel in-flight exchanges and refuse late results from now on.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Send credentials to the backend.
    ///
    /// The store becomes `Active(username)` only when the backend reports
    /// success and names the user; identity is never taken from `credentials`.
    pub async fn login(&self, credentials: &Credentials) -> AuthResult {
        let Some(outcome) = self.exchange(self.backend.login(credentials)).await else {
            tracing::debug!("login cancelled by shutdown");
            return AuthResult::failure(LOGIN_FAILED_MESSAGE);
        };

        match outcome {
            Ok(result) if result.success => {
                match result.username.as_deref().filter(|name| !name.trim().is_empty()) {
                    Some(username) => {
                        tracing::info!(username, labels = result.labels.len(), "login accepted");
                        self.store
                            .set_with_labels(true, Some(username.to_owned()), result.labels.clone());
                    }
                    None => tracing::warn!("login succeeded without a username; session left unchanged"),
                }
                result
            }
            Ok(result) => {
                tracing::warn!(reason = result.message.as_deref().unwrap_or_default(), "login rejected");
                result
            }
            Err(e) => {
                tracing::warn!(error = %e, "login failed");
                AuthResult::failure(e.server_message().unwrap_or(LOGIN_FAILED_MESSAGE))
            }
        }
    }

    /// Ask the backend to end the session. Local state is cleared whatever the outcome.
    pub async fn logout(&self) -> AuthResult {
        let outcome = self.exchange(self.backend.logout()).await;
        self.store.reset();

        match outcome {
            Some(Ok(result)) => {
                tracing::info!(success = result.success, "logged out");
                result
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "logout request failed; local session cleared");
                AuthResult::failure(LOGOUT_FAILED_MESSAGE)
            }
            None => {
                tracing::debug!("logout cancelled by shutdown; local session cleared");
                AuthResult::failure(LOGOUT_FAILED_MESSAGE)
            }
        }
    }

    /// Query the backend's view of this session and adopt it.
    ///
    /// A failed check means "not authenticated", never "unknown". An
    /// unauthenticated answer is returned as `SessionInfo::anonymous()`, so a
    /// stray username or labels never reach the caller or the store.
    pub async fn get_session_info(&self) -> SessionInfo {
        let Some(outcome) = self.exchange(self.backend.session()).await else {
            tracing::debug!("session check cancelled by shutdown");
            return SessionInfo::anonymous();
        };

        match outcome {
            Ok(info) if info.authenticated => {
                self.store
                    .set_with_labels(true, info.username.clone(), info.labels.clone());
                info
            }
            Ok(_) => {
                self.store.reset();
                SessionInfo::anonymous()
            }
            Err(e) => {
                tracing::warn!(error = %e, "session check failed; treating as anonymous");
                self.store.reset();
                SessionInfo::anonymous()
            }
        }
    }

    /// Always a fresh round trip; the store may be stale relative to server-side expiry.
    pub async fn check_auth_status(&self) -> bool {
        self.get_session_info().await.authenticated
    }

    /// Run one exchange unless shutdown wins the race. `None` means cancelled.
    async fn exchange<T, F>(&self, request: F) -> Option<Result<T, BackendError>>
    where
        F: Future<Output = Result<T, BackendError>>,
    {
        tokio::select! {
            biased;
            () = self.shutdown.cancelled() => None,
            outcome = request => Some(outcome),
        }
    }
}

#[async_trait]
impl AuthStatus for AuthSession {
    async fn check_auth_status(&self) -> bool {
        AuthSession::check_auth_status(self).await
    }
}
