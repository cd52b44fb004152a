//! Client-side session core: session store, auth session service, and the
//! navigation guard that gates protected routes.
//!
//! ARCHITECTURE
//! ============
//! `Navigator` -> `NavigationGuard` -> `AuthSession::check_auth_status` ->
//! `AuthBackend` round trip -> `SessionStore` update. Login and logout take the
//! same path without the guard. One `SessionStore` is shared by `Arc`; only
//! `AuthSession` writes it.

pub mod backend;
pub mod config;
pub mod guard;
pub mod router;
pub mod session;
pub mod store;
pub mod types;

#[cfg(test)]
mod test_support;

pub use backend::{AuthBackend, BackendError, HttpBackend};
pub use config::{ClientConfig, ConfigError};
pub use guard::{GuardDecision, NavigationGuard};
pub use router::{NavigationOutcome, Navigator, RouteTable};
pub use session::{AuthSession, AuthStatus};
pub use store::SessionStore;
pub use types::{AuthResult, Credentials, SessionInfo, SessionLabel, SessionState};
