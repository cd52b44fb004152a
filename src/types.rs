//! Session DTOs shared by the store, the backend seam, and the guard.
//!
//! DESIGN
//! ======
//! Field names mirror the backend's JSON (`success`, `message`, `username`,
//! `authenticated`, `labels`) so serde round-trips need no renames. Optional
//! fields default when absent because failure bodies only promise `message`.

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// CREDENTIALS
// =============================================================================

/// Username/password pair passed once to `login`. Never stored.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// SESSION LABELS
// =============================================================================

/// Document category a session is cleared to view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionLabel {
    ComputerScience,
    Philosophy,
    Religion,
    SocialSciences,
    Language,
    Science,
    Technology,
    Arts,
    Literature,
    History,
    Geography,
}

impl SessionLabel {
    pub const ALL: [Self; 11] = [
        Self::ComputerScience,
        Self::Philosophy,
        Self::Religion,
        Self::SocialSciences,
        Self::Language,
        Self::Science,
        Self::Technology,
        Self::Arts,
        Self::Literature,
        Self::History,
        Self::Geography,
    ];

    /// Wire name, e.g. `"SOCIAL_SCIENCES"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ComputerScience => "COMPUTER_SCIENCE",
            Self::Philosophy => "PHILOSOPHY",
            Self::Religion => "RELIGION",
            Self::SocialSciences => "SOCIAL_SCIENCES",
            Self::Language => "LANGUAGE",
            Self::Science => "SCIENCE",
            Self::Technology => "TECHNOLOGY",
            Self::Arts => "ARTS",
            Self::Literature => "LITERATURE",
            Self::History => "HISTORY",
            Self::Geography => "GEOGRAPHY",
        }
    }

    /// Human-readable name shown next to a document category.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::ComputerScience => "Computer Science",
            Self::Philosophy => "Philosophy",
            Self::Religion => "Religion",
            Self::SocialSciences => "Social Sciences",
            Self::Language => "Language",
            Self::Science => "Science",
            Self::Technology => "Technology",
            Self::Arts => "Arts",
            Self::Literature => "Literature",
            Self::History => "History",
            Self::Geography => "Geography",
        }
    }
}

impl FromStr for SessionLabel {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == raw)
            .ok_or_else(|| format!("unknown session label: {raw}"))
    }
}

impl fmt::Display for SessionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Accept `null`, a missing field, or a list of label names; unknown names are skipped.
fn deserialize_labels_lenient<'de, D>(deserializer: D) -> Result<Vec<SessionLabel>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .iter()
        .filter_map(serde_json::Value::as_str)
        .filter_map(|name| name.parse().ok())
        .collect())
}

// =============================================================================
// EXCHANGE RESULTS
// =============================================================================

/// Body of a login or logout exchange.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResult {
    /// Whether the backend accepted the request.
    #[serde(default)]
    pub success: bool,
    /// Human-readable reason, set on failures (and some successes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Server-asserted identity; present only on a successful login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Categories granted to the new session.
    #[serde(default, deserialize_with = "deserialize_labels_lenient", skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<SessionLabel>,
}

impl AuthResult {
    /// Synthesized failure carrying `message`.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, message: Some(message.into()), username: None, labels: Vec::new() }
    }
}

/// Body of the "who am I" exchange.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// `None` whenever `authenticated` is false.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default, deserialize_with = "deserialize_labels_lenient", skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<SessionLabel>,
}

impl SessionInfo {
    /// The "not authenticated" answer used when the backend cannot be reached.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }
}

// =============================================================================
// SESSION STATE
// =============================================================================

/// Value held by the session store.
///
/// `authenticated == false` implies `current_user` is `None` and `labels` is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub authenticated: bool,
    pub current_user: Option<String>,
    pub labels: Vec<SessionLabel>,
}

impl SessionState {
    /// Build a state, collapsing anything inconsistent with `authenticated == false`.
    #[must_use]
    pub fn new(authenticated: bool, current_user: Option<String>, labels: Vec<SessionLabel>) -> Self {
        if authenticated {
            Self { authenticated, current_user, labels }
        } else {
            Self::default()
        }
    }

    /// The initial `Anonymous` state.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// `Active(username)` with no labels.
    #[must_use]
    pub fn active(username: impl Into<String>) -> Self {
        Self { authenticated: true, current_user: Some(username.into()), labels: Vec::new() }
    }
}
