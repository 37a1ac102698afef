// ABOUTME: Application state and async action processing for the IDE dialog TUI

use crate::api::{ApiClient, InitializeOptions, NoteLevel};
use crate::config::AppConfig;
use crate::ide::{
    self, launch, lock_state, refresh_active, shared_state, stop, LaunchOutcome, LaunchTarget,
    SessionScope, SharedIdeState,
};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{info, warn};

/// Which dialog variant is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    /// Student-facing assignment IDE dialog.
    Student,
    /// Admin management dialog with the editable settings form.
    Admin,
}

/// Editing state of the admin settings form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub selected: usize,
    pub editing: bool,
    pub buffer: String,
}

/// Lifecycle work queued by key handling and drained by [`App::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncAction {
    CheckAvailability,
    RefreshActive,
    LoadDefaultSettings,
    Launch,
    Stop,
}

pub struct AppState {
    pub ide: SharedIdeState,
    pub dialog: DialogKind,
    /// Assignment the student dialog launches against.
    pub assignment_id: Option<String>,
    /// Student launch options, mirrored into the initialize body.
    pub autosave: bool,
    pub persistent_storage: bool,
    pub form: FormState,
    pub help_visible: bool,
    pub should_quit: bool,
    pub pending_actions: VecDeque<AsyncAction>,
    /// Bumped every tick for the loading spinner.
    pub spinner_frame: usize,
    settings_loaded: bool,
}

impl AppState {
    pub fn new(dialog: DialogKind, assignment_id: Option<String>) -> Self {
        Self {
            ide: shared_state(),
            dialog,
            assignment_id,
            autosave: true,
            persistent_storage: false,
            form: FormState::default(),
            help_visible: false,
            should_quit: false,
            pending_actions: VecDeque::new(),
            spinner_frame: 0,
            settings_loaded: false,
        }
    }

    pub fn queue(&mut self, action: AsyncAction) {
        if !self.pending_actions.contains(&action) {
            self.pending_actions.push_back(action);
        }
    }

    pub fn scope(&self) -> SessionScope {
        match (&self.dialog, &self.assignment_id) {
            (DialogKind::Admin, _) => SessionScope::Admin,
            (DialogKind::Student, Some(assignment_id)) => {
                SessionScope::Assignment(assignment_id.clone())
            }
            // Student dialog without an assignment still renders; lifecycle
            // actions against it are rejected in process_event.
            (DialogKind::Student, None) => SessionScope::Admin,
        }
    }

    /// The launch control's disabled precondition: busy, or quota exhausted.
    pub fn launch_blocked(&self) -> bool {
        let ide = lock_state(&self.ide);
        ide.loading || ide.sessions_available == Some(false)
    }

    pub fn session_held(&self) -> bool {
        lock_state(&self.ide).session.is_some()
    }

    /// Field names of the settings form in render order.
    pub fn form_fields(&self) -> Vec<String> {
        lock_state(&self.ide)
            .settings
            .fields()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Switch dialog variants, resetting form state. The admin dialog
    /// re-fetches its active session every time it comes up, and loads the
    /// server's default settings the first time.
    pub fn switch_dialog(&mut self) {
        self.dialog = match self.dialog {
            DialogKind::Student => DialogKind::Admin,
            DialogKind::Admin => DialogKind::Student,
        };
        self.form = FormState::default();
        if self.dialog == DialogKind::Admin {
            if !self.settings_loaded {
                self.settings_loaded = true;
                self.queue(AsyncAction::LoadDefaultSettings);
            }
            self.queue(AsyncAction::RefreshActive);
        }
    }
}

pub struct App {
    pub state: AppState,
    api: Arc<ApiClient>,
    config: AppConfig,
}

impl App {
    pub fn new(api: ApiClient, config: AppConfig, state: AppState) -> Self {
        Self {
            state,
            api: Arc::new(api),
            config,
        }
    }

    /// Mount-time fetches: quota once, then the active session for the
    /// opening dialog (plus form defaults for the admin dialog).
    pub fn init(&mut self) {
        self.state.queue(AsyncAction::CheckAvailability);
        if self.state.dialog == DialogKind::Admin {
            self.state.settings_loaded = true;
            self.state.queue(AsyncAction::LoadDefaultSettings);
        }
        if self.state.dialog == DialogKind::Admin || self.state.assignment_id.is_some() {
            self.state.queue(AsyncAction::RefreshActive);
        }
    }

    /// One UI tick: prune stale notices, advance the spinner, and spawn
    /// lifecycle tasks for everything queued. Tasks mutate the shared
    /// ide-state bag; the next draw picks the changes up.
    pub fn tick(&mut self) {
        self.state.spinner_frame = self.state.spinner_frame.wrapping_add(1);
        lock_state(&self.state.ide).prune_notices();

        while let Some(action) = self.state.pending_actions.pop_front() {
            self.spawn(action);
        }
    }

    fn spawn(&self, action: AsyncAction) {
        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state.ide);
        info!(?action, "processing lifecycle action");

        match action {
            AsyncAction::CheckAvailability => {
                tokio::spawn(async move {
                    match ide::IdeApi::sessions_available(api.as_ref()).await {
                        Ok(normalized) => {
                            let mut ide = lock_state(&state);
                            ide.sessions_available = Some(normalized.data.sessions_available);
                            ide.push_note(normalized.note);
                        }
                        Err(error) => lock_state(&state).report_error(&error),
                    }
                });
            }
            AsyncAction::RefreshActive => {
                let scope = self.state.scope();
                let watch = self.config.watch_poller();
                tokio::spawn(async move {
                    refresh_active(api.as_ref(), &state, &scope, &watch).await;
                });
            }
            AsyncAction::LoadDefaultSettings => {
                tokio::spawn(async move {
                    match ide::IdeApi::default_settings(api.as_ref()).await {
                        Ok(normalized) => {
                            let mut ide = lock_state(&state);
                            ide.push_note(normalized.note);
                            if !normalized.data.settings.is_empty() {
                                ide.settings = normalized.data.settings;
                            }
                        }
                        Err(error) => lock_state(&state).report_error(&error),
                    }
                });
            }
            AsyncAction::Launch => {
                let Some(target) = self.launch_target() else {
                    lock_state(&self.state.ide).notify(
                        NoteLevel::Warning,
                        "no assignment selected, nothing to launch",
                    );
                    return;
                };
                let poller = self.config.launch_poller();
                tokio::spawn(async move {
                    let outcome = launch(api.as_ref(), &state, &target, &poller).await;
                    if let LaunchOutcome::AlreadyHeld { redirect_url } = outcome {
                        open_held_session(&state, redirect_url);
                    }
                });
            }
            AsyncAction::Stop => {
                let admin = self.state.dialog == DialogKind::Admin;
                tokio::spawn(async move {
                    stop(api.as_ref(), &state, admin).await;
                });
            }
        }
    }

    fn launch_target(&self) -> Option<LaunchTarget> {
        match self.state.dialog {
            DialogKind::Student => {
                let assignment_id = self.state.assignment_id.clone()?;
                Some(LaunchTarget::Assignment {
                    assignment_id,
                    options: InitializeOptions {
                        autosave: self.state.autosave,
                        persistent_storage: self.state.persistent_storage,
                    },
                })
            }
            DialogKind::Admin => {
                let settings = lock_state(&self.state.ide).settings.clone();
                if settings.is_empty() {
                    Some(LaunchTarget::AdminDefault)
                } else {
                    Some(LaunchTarget::AdminCustom(settings))
                }
            }
        }
    }
}

fn open_held_session(state: &SharedIdeState, redirect_url: Option<String>) {
    match redirect_url {
        Some(url) => match crate::app::browser::open_url(&url) {
            Ok(()) => {
                lock_state(state).notify(NoteLevel::Info, format!("opening {url}"));
            }
            Err(error) => {
                warn!(%error, "failed to open browser");
                lock_state(state).notify(
                    NoteLevel::Warning,
                    format!("could not open a browser, go to {url}"),
                );
            }
        },
        None => {
            lock_state(state).notify(
                NoteLevel::Warning,
                "session has no redirect url yet, try again shortly",
            );
        }
    }
}
