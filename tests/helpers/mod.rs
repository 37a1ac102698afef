// ABOUTME: Scripted IdeApi fake and session builders shared by the lifecycle tests

#![allow(dead_code)]

use anubis_ide::api::{
    Acknowledged, ActivePayload, ApiError, AvailablePayload, InitializePayload, Normalized,
    NoteLevel, PollPayload, SettingsPayload, StatusNote,
};
use anubis_ide::ide::{IdeApi, LaunchTarget, SessionScope};
use anubis_ide::models::{Session, SessionState};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

type Scripted<T> = Mutex<VecDeque<Result<Normalized<T>, ApiError>>>;

/// In-memory stand-in for the HTTP client. Each endpoint answers from its
/// own queue of scripted responses and counts how often it was hit; running
/// a queue dry fails the test, which is how the request-count properties
/// are enforced.
#[derive(Default)]
pub struct ScriptedApi {
    available_responses: Scripted<AvailablePayload>,
    active_responses: Scripted<ActivePayload>,
    initialize_responses: Scripted<InitializePayload>,
    poll_responses: Scripted<PollPayload>,
    stop_responses: Scripted<Acknowledged>,
    settings_responses: Scripted<SettingsPayload>,
    pub available_calls: AtomicU32,
    pub active_calls: AtomicU32,
    pub initialize_calls: AtomicU32,
    pub poll_calls: AtomicU32,
    pub stop_calls: AtomicU32,
    pub settings_calls: AtomicU32,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_available(&self, response: Result<Normalized<AvailablePayload>, ApiError>) {
        self.available_responses.lock().unwrap().push_back(response);
    }

    pub fn script_active(&self, response: Result<Normalized<ActivePayload>, ApiError>) {
        self.active_responses.lock().unwrap().push_back(response);
    }

    pub fn script_initialize(&self, response: Result<Normalized<InitializePayload>, ApiError>) {
        self.initialize_responses.lock().unwrap().push_back(response);
    }

    pub fn script_poll(&self, response: Result<Normalized<PollPayload>, ApiError>) {
        self.poll_responses.lock().unwrap().push_back(response);
    }

    /// Queue `count` "still loading" poll answers in a row.
    pub fn script_loading_polls(&self, count: u32) {
        for _ in 0..count {
            self.script_poll(Ok(ok_payload(PollPayload {
                loading: true,
                session: Some(session("s1", SessionState::Initializing)),
            })));
        }
    }

    pub fn script_stop(&self, response: Result<Normalized<Acknowledged>, ApiError>) {
        self.stop_responses.lock().unwrap().push_back(response);
    }

    pub fn script_settings(&self, response: Result<Normalized<SettingsPayload>, ApiError>) {
        self.settings_responses.lock().unwrap().push_back(response);
    }

    fn take<T>(queue: &Scripted<T>, endpoint: &str) -> Result<Normalized<T>, ApiError> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted {endpoint} request"))
    }
}

impl IdeApi for ScriptedApi {
    async fn sessions_available(&self) -> Result<Normalized<AvailablePayload>, ApiError> {
        self.available_calls.fetch_add(1, Ordering::SeqCst);
        Self::take(&self.available_responses, "sessions_available")
    }

    async fn active(&self, _scope: &SessionScope) -> Result<Normalized<ActivePayload>, ApiError> {
        self.active_calls.fetch_add(1, Ordering::SeqCst);
        Self::take(&self.active_responses, "active")
    }

    async fn initialize(
        &self,
        _target: &LaunchTarget,
    ) -> Result<Normalized<InitializePayload>, ApiError> {
        self.initialize_calls.fetch_add(1, Ordering::SeqCst);
        Self::take(&self.initialize_responses, "initialize")
    }

    async fn poll(&self, _session_id: &str) -> Result<Normalized<PollPayload>, ApiError> {
        self.poll_calls.fetch_add(1, Ordering::SeqCst);
        Self::take(&self.poll_responses, "poll")
    }

    async fn stop(
        &self,
        _session_id: &str,
        _admin: bool,
    ) -> Result<Normalized<Acknowledged>, ApiError> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        Self::take(&self.stop_responses, "stop")
    }

    async fn default_settings(&self) -> Result<Normalized<SettingsPayload>, ApiError> {
        self.settings_calls.fetch_add(1, Ordering::SeqCst);
        Self::take(&self.settings_responses, "default_settings")
    }
}

/// Wrap a payload the way a clean envelope would, with no status note.
pub fn ok_payload<T>(data: T) -> Normalized<T> {
    Normalized { data, note: None }
}

/// Wrap a payload with a server status note attached.
pub fn noted_payload<T>(data: T, level: NoteLevel, message: &str) -> Normalized<T> {
    Normalized {
        data,
        note: Some(StatusNote {
            message: message.to_string(),
            level,
        }),
    }
}

pub fn session(id: &str, state: SessionState) -> Session {
    Session {
        id: id.to_string(),
        state,
        redirect_url: None,
        created: None,
        autosave: true,
        persistent_storage: None,
        repo_url: None,
    }
}

pub fn running_session(id: &str, redirect_url: &str) -> Session {
    Session {
        redirect_url: Some(redirect_url.to_string()),
        ..session(id, SessionState::Running)
    }
}
