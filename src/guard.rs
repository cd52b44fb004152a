//! Navigation guard for protected routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Invoked by the navigator before entering a protected route. Every attempt
//! costs exactly one live session check; the store is never consulted because
//! it may be stale from an earlier navigation.

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;

use std::sync::Arc;

use crate::session::AuthStatus;

/// Outcome of a guard evaluation. A redirect is a normal result, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

pub struct NavigationGuard {
    status: Arc<dyn AuthStatus>,
    login_path: String,
}

impl NavigationGuard {
    #[must_use]
    pub fn new(status: Arc<dyn AuthStatus>, login_path: impl Into<String>) -> Self {
        Self { status, login_path: login_path.into() }
    }

    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Confirm the session with the backend, then allow or redirect to login.
    pub async fn check(&self, route: &str) -> GuardDecision {
        if self.status.check_auth_status().await {
            tracing::debug!(route, "guard allowed navigation");
            GuardDecision::Allow
        } else {
            tracing::debug!(route, redirect = %self.login_path, "guard redirected navigation");
            GuardDecision::Redirect(self.login_path.clone())
        }
    }
}
