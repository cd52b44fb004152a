//! Route table and navigator.
//!
//! DESIGN
//! ======
//! The route table is static: the login route is public, `dashboard` is
//! protected, and the empty path redirects to the login route. The login path
//! comes from `ClientConfig`, so the guard's redirect target always resolves.
//! `Navigator` runs the guard at the
//! point a protected route would be entered. Starting a new navigation
//! cancels the pending one, and a cancelled check is dropped before its
//! result can reach the store.

#[cfg(test)]
#[path = "router_test.rs"]
mod tests;

use std::sync::{Arc, Mutex, PoisonError};

use tokio_util::sync::CancellationToken;

use crate::config::DEFAULT_LOGIN_PATH;
use crate::guard::{GuardDecision, NavigationGuard};
use crate::session::AuthSession;
use crate::types::AuthResult;

/// Guard and static redirects followed before giving up.
pub const MAX_REDIRECTS: usize = 8;

// =============================================================================
// ROUTE TABLE
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteKind {
    Public,
    Protected,
    Redirect(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    /// Path without leading or trailing slashes; `""` is the root.
    pub path: String,
    pub kind: RouteKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::for_login(DEFAULT_LOGIN_PATH)
    }
}

impl RouteTable {
    /// Empty table; see `Default` for the application's routes.
    #[must_use]
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    #[must_use]
    pub fn public(self, path: &str) -> Self {
        self.with(path, RouteKind::Public)
    }

    #[must_use]
    pub fn protected(self, path: &str) -> Self {
        self.with(path, RouteKind::Protected)
    }

    #[must_use]
    pub fn redirect(self, path: &str, to: &str) -> Self {
        self.with(path, RouteKind::Redirect(to.to_owned()))
    }

    fn with(mut self, path: &str, kind: RouteKind) -> Self {
        self.routes.push(Route { path: normalize(path).to_owned(), kind });
        self
    }

    /// The application's routes with the login route mounted at `login_path`.
    #[must_use]
    pub fn for_login(login_path: &str) -> Self {
        Self::new()
            .public(login_path)
            .protected("dashboard")
            .redirect("", &absolute(login_path))
    }

    /// First route whose path equals the normalized `path`.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        let path = normalize(path);
        self.routes.iter().find(|route| route.path == path)
    }
}

fn normalize(path: &str) -> &str {
    path.trim().trim_matches('/')
}

fn absolute(path: &str) -> String {
    format!("/{}", normalize(path))
}

// =============================================================================
// NAVIGATOR
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The route at this path was entered.
    Entered(String),
    /// Navigation to `from` ended at `to` after one or more redirects.
    Redirected { from: String, to: String },
    NotFound(String),
    /// Superseded by a newer navigation or torn down.
    Cancelled,
    TooManyRedirects(String),
}

pub struct Navigator {
    routes: RouteTable,
    guard: NavigationGuard,
    session: Arc<AuthSession>,
    pending: Mutex<CancellationToken>,
}

impl Navigator {
    #[must_use]
    pub fn new(routes: RouteTable, session: Arc<AuthSession>, login_path: impl Into<String>) -> Self {
        let guard = NavigationGuard::new(session.clone(), login_path);
        Self { routes, guard, session, pending: Mutex::new(CancellationToken::new()) }
    }

    /// Attempt a navigation, cancelling whichever one is still pending.
    pub async fn navigate(&self, path: &str) -> NavigationOutcome {
        let token = self.begin();
        tokio::select! {
            biased;
            () = token.cancelled() => {
                tracing::debug!(path, "navigation cancelled");
                NavigationOutcome::Cancelled
            }
            outcome = self.walk(path) => outcome,
        }
    }

    /// Cancel the pending navigation, if any.
    pub fn teardown(&self) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cancel();
    }

    /// End the session, then head to the login route whatever the logout outcome.
    pub async fn logout(&self) -> (AuthResult, NavigationOutcome) {
        let result = self.session.logout().await;
        let outcome = self.navigate(self.guard.login_path()).await;
        (result, outcome)
    }

    fn begin(&self) -> CancellationToken {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        pending.cancel();
        *pending = CancellationToken::new();
        pending.clone()
    }

    async fn walk(&self, path: &str) -> NavigationOutcome {
        let from = absolute(path);
        let mut current = from.clone();

        for _ in 0..=MAX_REDIRECTS {
            let Some(route) = self.routes.resolve(&current) else {
                return NavigationOutcome::NotFound(current);
            };

            let next = match &route.kind {
                RouteKind::Public => None,
                RouteKind::Redirect(to) => Some(to.clone()),
                RouteKind::Protected => match self.guard.check(&current).await {
                    GuardDecision::Allow => None,
                    GuardDecision::Redirect(to) => Some(to),
                },
            };

            match next {
                Some(to) => current = absolute(&to),
                None if current == from => return NavigationOutcome::Entered(current),
                None => return NavigationOutcome::Redirected { from, to: current },
            }
        }

        tracing::warn!(path = %from, "navigation exceeded redirect limit");
        NavigationOutcome::TooManyRedirects(from)
    }
}
