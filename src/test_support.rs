//! Scripted backend for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::backend::{AuthBackend, BackendError};
use crate::session::AuthSession;
use crate::store::SessionStore;
use crate::types::{AuthResult, Credentials, SessionInfo};

type Scripted<T> = Mutex<VecDeque<(Result<T, BackendError>, Option<oneshot::Receiver<()>>)>>;

/// Answers each endpoint from a queue. A queued answer may carry a gate; the
/// call then stays in flight until the matching `Gate` is opened.
#[derive(Default)]
pub(crate) struct MockBackend {
    logins: Scripted<AuthResult>,
    logouts: Scripted<AuthResult>,
    sessions: Scripted<SessionInfo>,
    pub(crate) login_calls: AtomicUsize,
    pub(crate) logout_calls: AtomicUsize,
    pub(crate) session_calls: AtomicUsize,
    pub(crate) last_credentials: Mutex<Option<Credentials>>,
}

/// Releases one gated response.
pub(crate) struct Gate(oneshot::Sender<()>);

impl Gate {
    pub(crate) fn open(self) {
        let _ = self.0.send(());
    }
}

impl MockBackend {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn push_login(&self, outcome: Result<AuthResult, BackendError>) {
        self.logins.lock().unwrap().push_back((outcome, None));
    }

    pub(crate) fn push_logout(&self, outcome: Result<AuthResult, BackendError>) {
        self.logouts.lock().unwrap().push_back((outcome, None));
    }

    pub(crate) fn push_session(&self, outcome: Result<SessionInfo, BackendError>) {
        self.sessions.lock().unwrap().push_back((outcome, None));
    }

    pub(crate) fn push_gated_logout(&self, outcome: Result<AuthResult, BackendError>) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.logouts.lock().unwrap().push_back((outcome, Some(rx)));
        Gate(tx)
    }

    pub(crate) fn push_gated_session(&self, outcome: Result<SessionInfo, BackendError>) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.sessions.lock().unwrap().push_back((outcome, Some(rx)));
        Gate(tx)
    }

    pub(crate) fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

async fn answer<T>(queue: &Scripted<T>) -> Result<T, BackendError> {
    let next = queue.lock().unwrap().pop_front();
    let Some((outcome, gate)) = next else {
        return Err(BackendError::Request("no scripted response".to_owned()));
    };
    if let Some(gate) = gate {
        let _ = gate.await;
    }
    outcome
}

#[async_trait]
impl AuthBackend for MockBackend {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResult, BackendError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_credentials.lock().unwrap() = Some(credentials.clone());
        answer(&self.logins).await
    }

    async fn logout(&self) -> Result<AuthResult, BackendError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        answer(&self.logouts).await
    }

    async fn session(&self) -> Result<SessionInfo, BackendError> {
        self.session_calls.fetch_add(1, Ordering::SeqCst);
        answer(&self.sessions).await
    }
}

// =============================================================================
// fixtures
// =============================================================================

pub(crate) fn session_with(backend: &Arc<MockBackend>) -> AuthSession {
    AuthSession::new(backend.clone(), Arc::new(SessionStore::new()))
}

pub(crate) fn login_ok(username: &str) -> Result<AuthResult, BackendError> {
    Ok(AuthResult {
        success: true,
        message: Some("Login successful".to_owned()),
        username: Some(username.to_owned()),
        labels: Vec::new(),
    })
}

pub(crate) fn logout_ok() -> Result<AuthResult, BackendError> {
    Ok(AuthResult { success: true, message: Some("Logout successful".to_owned()), ..AuthResult::default() })
}

pub(crate) fn active(username: &str) -> Result<SessionInfo, BackendError> {
    Ok(SessionInfo { username: Some(username.to_owned()), authenticated: true, labels: Vec::new() })
}

pub(crate) fn anonymous() -> Result<SessionInfo, BackendError> {
    Ok(SessionInfo::anonymous())
}

pub(crate) fn offline<T>() -> Result<T, BackendError> {
    Err(BackendError::Request("connection refused".to_owned()))
}
