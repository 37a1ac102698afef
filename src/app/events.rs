// ABOUTME: Keyboard event mapping and action dispatch for the IDE dialog TUI

use crate::app::state::{AppState, AsyncAction, DialogKind};
use crate::api::NoteLevel;
use crate::ide::lock_state;
use crate::models::{SettingEdit, SettingValue};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    ToggleHelp,
    SwitchDialog,
    LaunchSession,
    StopSession,
    RefreshActive,
    ToggleAutosave,
    TogglePersistentStorage,
    // Admin settings form
    FormNext,
    FormPrev,
    FormActivate,
    FormInput(char),
    FormBackspace,
    FormCommit,
    FormCancel,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key: KeyEvent, state: &AppState) -> Option<AppEvent> {
        if state.form.editing {
            return match key.code {
                KeyCode::Enter => Some(AppEvent::FormCommit),
                KeyCode::Esc => Some(AppEvent::FormCancel),
                KeyCode::Backspace => Some(AppEvent::FormBackspace),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(AppEvent::FormInput(c))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char('q') => Some(AppEvent::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(AppEvent::Quit)
            }
            KeyCode::Esc if state.help_visible => Some(AppEvent::ToggleHelp),
            KeyCode::Esc => Some(AppEvent::Quit),
            KeyCode::Char('?') => Some(AppEvent::ToggleHelp),
            KeyCode::Char('d') => Some(AppEvent::SwitchDialog),
            KeyCode::Enter | KeyCode::Char('l') => Some(AppEvent::LaunchSession),
            KeyCode::Char('s') => Some(AppEvent::StopSession),
            KeyCode::Char('r') => Some(AppEvent::RefreshActive),
            KeyCode::Char('a') => Some(AppEvent::ToggleAutosave),
            KeyCode::Char('p') => Some(AppEvent::TogglePersistentStorage),
            KeyCode::Down | KeyCode::Char('j') => Some(AppEvent::FormNext),
            KeyCode::Up | KeyCode::Char('k') => Some(AppEvent::FormPrev),
            KeyCode::Char(' ') => Some(AppEvent::FormActivate),
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        match event {
            AppEvent::Quit => {
                lock_state(&state.ide).invalidate_poll();
                state.should_quit = true;
            }
            AppEvent::ToggleHelp => state.help_visible = !state.help_visible,
            AppEvent::SwitchDialog => state.switch_dialog(),
            AppEvent::LaunchSession => {
                if state.launch_blocked() {
                    lock_state(&state.ide).notify(
                        NoteLevel::Warning,
                        "launch unavailable right now (busy or no sessions available)",
                    );
                } else {
                    state.queue(AsyncAction::Launch);
                }
            }
            AppEvent::StopSession => {
                if state.session_held() || lock_state(&state.ide).loading {
                    state.queue(AsyncAction::Stop);
                }
            }
            AppEvent::RefreshActive => {
                // A student dialog with no assignment has no scope to refresh.
                if state.dialog == DialogKind::Admin || state.assignment_id.is_some() {
                    state.queue(AsyncAction::RefreshActive);
                }
            }
            AppEvent::ToggleAutosave => {
                // Matches the dialog: launch options lock once a session exists.
                if state.dialog == DialogKind::Student && !state.session_held() {
                    state.autosave = !state.autosave;
                }
            }
            AppEvent::TogglePersistentStorage => {
                if state.dialog == DialogKind::Student && !state.session_held() {
                    state.persistent_storage = !state.persistent_storage;
                }
            }
            AppEvent::FormNext => Self::move_form_selection(state, 1),
            AppEvent::FormPrev => Self::move_form_selection(state, -1),
            AppEvent::FormActivate => Self::activate_form_field(state),
            AppEvent::FormInput(c) => state.form.buffer.push(c),
            AppEvent::FormBackspace => {
                state.form.buffer.pop();
            }
            AppEvent::FormCommit => Self::commit_form_field(state),
            AppEvent::FormCancel => {
                state.form.editing = false;
                state.form.buffer.clear();
            }
        }
    }

    fn move_form_selection(state: &mut AppState, delta: isize) {
        if state.dialog != DialogKind::Admin {
            return;
        }
        let count = state.form_fields().len();
        if count == 0 {
            return;
        }
        let current = state.form.selected as isize;
        let next = (current + delta).rem_euclid(count as isize);
        state.form.selected = next as usize;
    }

    fn activate_form_field(state: &mut AppState) {
        if state.dialog != DialogKind::Admin || state.session_held() {
            return;
        }
        let fields = state.form_fields();
        let Some(field) = fields.get(state.form.selected) else {
            return;
        };

        let mut ide = lock_state(&state.ide);
        match ide.settings.get(field) {
            Some(SettingValue::Flag(_)) => {
                ide.settings = ide.settings.reduce(field, &SettingEdit::Toggle);
            }
            Some(SettingValue::Text(value)) => {
                state.form.editing = true;
                state.form.buffer = value.clone();
            }
            None => {}
        }
    }

    fn commit_form_field(state: &mut AppState) {
        let fields = state.form_fields();
        if let Some(field) = fields.get(state.form.selected) {
            let mut ide = lock_state(&state.ide);
            ide.settings = ide
                .settings
                .reduce(field, &SettingEdit::Text(state.form.buffer.clone()));
        }
        state.form.editing = false;
        state.form.buffer.clear();
    }
}
