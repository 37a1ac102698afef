// ABOUTME: Session data model representing one remote Anubis Cloud IDE instance

use serde::{Deserialize, Serialize};

/// State labels the Anubis API emits for a Cloud IDE session.
///
/// The terminal set (`Running`, `Ended`, `Stopped`, `Failed`) ends the poll
/// loop; everything else, including labels this client has never seen,
/// counts as still pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SessionState {
    Initializing,
    Running,
    Ending,
    Ended,
    Stopped,
    Failed,
    /// Label the backend emits that this client does not know about.
    Other(String),
}

impl From<String> for SessionState {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Initializing" => SessionState::Initializing,
            "Running" => SessionState::Running,
            "Ending" => SessionState::Ending,
            "Ended" => SessionState::Ended,
            "Stopped" => SessionState::Stopped,
            "Failed" => SessionState::Failed,
            _ => SessionState::Other(label),
        }
    }
}

impl From<SessionState> for String {
    fn from(state: SessionState) -> Self {
        state.label().to_string()
    }
}

impl SessionState {
    pub fn label(&self) -> &str {
        match self {
            SessionState::Initializing => "Initializing",
            SessionState::Running => "Running",
            SessionState::Ending => "Ending",
            SessionState::Ended => "Ended",
            SessionState::Stopped => "Stopped",
            SessionState::Failed => "Failed",
            SessionState::Other(label) => label,
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            SessionState::Running => "●",
            SessionState::Initializing | SessionState::Ending => "◌",
            SessionState::Ended | SessionState::Stopped => "⏸",
            SessionState::Failed => "✗",
            SessionState::Other(_) => "?",
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, SessionState::Running)
    }

    /// Whether the poll loop should keep going when it observes this state.
    pub fn is_transient(&self) -> bool {
        !matches!(
            self,
            SessionState::Running
                | SessionState::Ended
                | SessionState::Stopped
                | SessionState::Failed
        )
    }
}

/// One Cloud IDE session as the server reports it.
///
/// The authoritative record is server-owned; this is a possibly-stale copy
/// replaced wholesale on every successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub state: SessionState,
    /// URL of the running instance, present once the session is ready.
    #[serde(default)]
    pub redirect_url: Option<String>,
    /// Server-formatted creation timestamp, display only.
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default = "default_true")]
    pub autosave: bool,
    #[serde(default)]
    pub persistent_storage: Option<bool>,
    #[serde(default)]
    pub repo_url: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Session {
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn is_transient(&self) -> bool {
        self.state.is_transient()
    }
}
