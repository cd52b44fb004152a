//! Session store: the single source of truth for client session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only `AuthSession` writes (setters are crate-private). Views, the CLI and
//! tests read snapshots or subscribe for change notifications.
//!
//! DESIGN
//! ======
//! The whole `SessionState` lives behind one `watch` channel so a single `set`
//! is observed atomically; readers can never see a fresh `authenticated` flag
//! paired with a username from an older update. Watchers wake only when a
//! write actually changes the held value.

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

use tokio::sync::watch;

use crate::types::{SessionLabel, SessionState};

/// In-memory session state shared by reference (`Arc<SessionStore>`).
#[derive(Debug)]
pub struct SessionStore {
    state: watch::Sender<SessionState>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Start `Anonymous`: no session is assumed until the backend proves one.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::anonymous());
        Self { state }
    }

    // =========================================================================
    // READ VIEWS
    // =========================================================================

    #[must_use]
    pub fn authenticated(&self) -> bool {
        self.state.borrow().authenticated
    }

    #[must_use]
    pub fn current_user(&self) -> Option<String> {
        self.state.borrow().current_user.clone()
    }

    #[must_use]
    pub fn labels(&self) -> Vec<SessionLabel> {
        self.state.borrow().labels.clone()
    }

    /// Consistent copy of all fields from one update.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver that is marked changed on every effective update.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    // =========================================================================
    // WRITES (AuthSession only)
    // =========================================================================

    /// Replace the held state, clearing labels. `current_user` is dropped when
    /// `authenticated` is false.
    pub(crate) fn set(&self, authenticated: bool, current_user: Option<String>) {
        self.set_with_labels(authenticated, current_user, Vec::new());
    }

    /// Replace all three fields in one update.
    pub(crate) fn set_with_labels(&self, authenticated: bool, current_user: Option<String>, labels: Vec<SessionLabel>) {
        self.replace(SessionState::new(authenticated, current_user, labels));
    }

    /// Back to `Anonymous`.
    pub(crate) fn reset(&self) {
        self.replace(SessionState::anonymous());
    }

    fn replace(&self, next: SessionState) {
        self.state.send_if_modified(|held| {
            if *held == next {
                return false;
            }
            *held = next;
            true
        });
    }
}
