// ABOUTME: Shared view-state bag for one IDE dialog plus the poll cancellation guard

use crate::api::{ApiError, NoteLevel, StatusNote};
use crate::models::{IdeSettings, Session};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Cancellation token for one poll chain. The chain checks the guard before
/// every continuation; stop and dialog teardown invalidate it, so a stale
/// chain can never overwrite fresher state.
#[derive(Debug, Clone)]
pub struct PollGuard(Arc<AtomicBool>);

impl PollGuard {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_live(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn invalidate(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    fn same_chain(&self, other: &PollGuard) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for PollGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// User-facing message queued by lifecycle work, the terminal rendering of
/// the browser client's snackbar toasts.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub level: NoteLevel,
    pub created_at: Instant,
}

impl Notice {
    pub fn new(level: NoteLevel, message: String) -> Self {
        Self {
            message,
            level,
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        let ttl = match self.level {
            NoteLevel::Error => Duration::from_secs(8),
            NoteLevel::Warning => Duration::from_secs(6),
            NoteLevel::Success | NoteLevel::Info => Duration::from_secs(4),
        };
        self.created_at.elapsed() > ttl
    }
}

/// View state for one IDE dialog instance: the tracked session, the spinner
/// flag, the quota flag, the requested settings, and the notice queue.
/// Client-local only; rebuilt from server responses and discarded on exit.
#[derive(Debug, Default)]
pub struct IdeState {
    pub session: Option<Session>,
    /// Last observed state label, kept for display even after the session
    /// itself is cleared ("Stopped", "Failed", ...).
    pub session_label: Option<String>,
    pub loading: bool,
    /// None until the quota endpoint has answered.
    pub sessions_available: Option<bool>,
    pub show_stop: bool,
    pub settings: IdeSettings,
    pub notices: Vec<Notice>,
    active_poll: Option<PollGuard>,
}

/// One dialog instance owns one state bag; lifecycle tasks share it.
pub type SharedIdeState = Arc<Mutex<IdeState>>;

pub fn shared_state() -> SharedIdeState {
    Arc::new(Mutex::new(IdeState::default()))
}

/// Lock helper. Holders must drop the guard before awaiting.
pub fn lock_state(state: &SharedIdeState) -> MutexGuard<'_, IdeState> {
    state.lock().expect("ide state lock poisoned")
}

impl IdeState {
    /// Replace the tracked session wholesale with what the server returned.
    pub fn adopt(&mut self, session: Option<Session>) {
        if let Some(session) = &session {
            self.session_label = Some(session.state.label().to_string());
        }
        self.session = session;
    }

    /// Start a new poll chain, invalidating any previous watcher so at most
    /// one authoritative chain exists per dialog.
    pub fn begin_poll(&mut self) -> PollGuard {
        self.invalidate_poll();
        let guard = PollGuard::new();
        self.active_poll = Some(guard.clone());
        guard
    }

    pub fn invalidate_poll(&mut self) {
        if let Some(guard) = self.active_poll.take() {
            guard.invalidate();
        }
    }

    /// Forget the active guard once its chain has finished, but only if it
    /// is still the chain that registered it.
    pub fn finish_poll(&mut self, guard: &PollGuard) {
        if let Some(active) = &self.active_poll {
            if active.same_chain(guard) {
                self.active_poll = None;
            }
        }
    }

    pub fn has_active_poll(&self) -> bool {
        self.active_poll.is_some()
    }

    pub fn notify(&mut self, level: NoteLevel, message: impl Into<String>) {
        self.notices.push(Notice::new(level, message.into()));
    }

    /// Queue the status note a successful envelope carried, if any.
    pub fn push_note(&mut self, note: Option<StatusNote>) {
        if let Some(note) = note {
            self.notices.push(Notice::new(note.level, note.message));
        }
    }

    /// Queue an API failure as an error notice.
    pub fn report_error(&mut self, error: &ApiError) {
        self.notify(NoteLevel::Error, error.to_string());
    }

    pub fn prune_notices(&mut self) {
        self.notices.retain(|notice| !notice.is_expired());
    }

    pub fn current_notices(&self) -> impl DoubleEndedIterator<Item = &Notice> {
        self.notices.iter().filter(|notice| !notice.is_expired())
    }
}
