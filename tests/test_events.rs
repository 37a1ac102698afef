// ABOUTME: Tests for key mapping and event processing in the dialog TUI

use anubis_ide::app::{AppEvent, AppState, AsyncAction, DialogKind, EventHandler};
use anubis_ide::ide::lock_state;
use anubis_ide::models::{SessionState, SettingValue};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn student_state() -> AppState {
    AppState::new(DialogKind::Student, Some("a1".to_string()))
}

fn held_session() -> anubis_ide::models::Session {
    anubis_ide::models::Session {
        id: "s1".to_string(),
        state: SessionState::Running,
        redirect_url: None,
        created: None,
        autosave: true,
        persistent_storage: None,
        repo_url: None,
    }
}

#[test]
fn test_basic_key_bindings() {
    let state = student_state();

    assert_eq!(
        EventHandler::handle_key_event(key(KeyCode::Char('q')), &state),
        Some(AppEvent::Quit)
    );
    assert_eq!(
        EventHandler::handle_key_event(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &state
        ),
        Some(AppEvent::Quit)
    );
    assert_eq!(
        EventHandler::handle_key_event(key(KeyCode::Enter), &state),
        Some(AppEvent::LaunchSession)
    );
    assert_eq!(
        EventHandler::handle_key_event(key(KeyCode::Char('s')), &state),
        Some(AppEvent::StopSession)
    );
    assert_eq!(
        EventHandler::handle_key_event(key(KeyCode::Char('d')), &state),
        Some(AppEvent::SwitchDialog)
    );
    assert_eq!(
        EventHandler::handle_key_event(key(KeyCode::F(5)), &state),
        None
    );
}

#[test]
fn test_editing_mode_captures_text_keys() {
    let mut state = student_state();
    state.form.editing = true;

    assert_eq!(
        EventHandler::handle_key_event(key(KeyCode::Char('q')), &state),
        Some(AppEvent::FormInput('q'))
    );
    assert_eq!(
        EventHandler::handle_key_event(key(KeyCode::Enter), &state),
        Some(AppEvent::FormCommit)
    );
    assert_eq!(
        EventHandler::handle_key_event(key(KeyCode::Esc), &state),
        Some(AppEvent::FormCancel)
    );
}

#[test]
fn test_blocked_launch_queues_warning_instead_of_action() {
    let mut state = student_state();
    lock_state(&state.ide).sessions_available = Some(false);

    EventHandler::process_event(AppEvent::LaunchSession, &mut state);

    assert!(state.pending_actions.is_empty());
    assert_eq!(lock_state(&state.ide).notices.len(), 1);
}

#[test]
fn test_launch_queues_when_quota_allows() {
    let mut state = student_state();
    lock_state(&state.ide).sessions_available = Some(true);

    EventHandler::process_event(AppEvent::LaunchSession, &mut state);

    assert_eq!(state.pending_actions.front(), Some(&AsyncAction::Launch));
}

#[test]
fn test_stop_requires_something_to_stop() {
    let mut state = student_state();
    EventHandler::process_event(AppEvent::StopSession, &mut state);
    assert!(state.pending_actions.is_empty());

    lock_state(&state.ide).adopt(Some(held_session()));
    EventHandler::process_event(AppEvent::StopSession, &mut state);
    assert_eq!(state.pending_actions.front(), Some(&AsyncAction::Stop));
}

#[test]
fn test_launch_options_lock_once_a_session_is_held() {
    let mut state = student_state();
    assert!(state.autosave);

    EventHandler::process_event(AppEvent::ToggleAutosave, &mut state);
    assert!(!state.autosave);

    lock_state(&state.ide).adopt(Some(held_session()));
    EventHandler::process_event(AppEvent::ToggleAutosave, &mut state);
    assert!(!state.autosave);
    EventHandler::process_event(AppEvent::TogglePersistentStorage, &mut state);
    assert!(!state.persistent_storage);
}

#[test]
fn test_refresh_needs_a_scope_to_fetch() {
    // A student dialog without an assignment has no active-session endpoint
    // of its own and must not fall through to the admin one.
    let mut state = AppState::new(DialogKind::Student, None);
    EventHandler::process_event(AppEvent::RefreshActive, &mut state);
    assert!(state.pending_actions.is_empty());

    let mut state = student_state();
    EventHandler::process_event(AppEvent::RefreshActive, &mut state);
    assert_eq!(
        state.pending_actions.front(),
        Some(&AsyncAction::RefreshActive)
    );

    let mut state = AppState::new(DialogKind::Admin, None);
    EventHandler::process_event(AppEvent::RefreshActive, &mut state);
    assert_eq!(
        state.pending_actions.front(),
        Some(&AsyncAction::RefreshActive)
    );
}

#[test]
fn test_quit_invalidates_the_active_poll_chain() {
    let mut state = student_state();
    let guard = lock_state(&state.ide).begin_poll();

    EventHandler::process_event(AppEvent::Quit, &mut state);

    assert!(state.should_quit);
    assert!(!guard.is_live());
}

#[test]
fn test_admin_form_toggle_and_text_edit() {
    let mut state = AppState::new(DialogKind::Admin, None);
    {
        let mut ide = lock_state(&state.ide);
        ide.settings.set("image", SettingValue::Text("a".to_string()));
        ide.settings.set("privileged", SettingValue::Flag(false));
    }

    // Fields render sorted: image first, privileged second.
    state.form.selected = 1;
    EventHandler::process_event(AppEvent::FormActivate, &mut state);
    assert_eq!(
        lock_state(&state.ide).settings.get("privileged"),
        Some(&SettingValue::Flag(true))
    );

    state.form.selected = 0;
    EventHandler::process_event(AppEvent::FormActivate, &mut state);
    assert!(state.form.editing);
    assert_eq!(state.form.buffer, "a");

    EventHandler::process_event(AppEvent::FormInput('b'), &mut state);
    EventHandler::process_event(AppEvent::FormCommit, &mut state);
    assert!(!state.form.editing);
    assert_eq!(
        lock_state(&state.ide).settings.get("image"),
        Some(&SettingValue::Text("ab".to_string()))
    );
}

#[test]
fn test_form_selection_wraps() {
    let mut state = AppState::new(DialogKind::Admin, None);
    {
        let mut ide = lock_state(&state.ide);
        ide.settings.set("image", SettingValue::Text("a".to_string()));
        ide.settings.set("privileged", SettingValue::Flag(false));
    }

    EventHandler::process_event(AppEvent::FormPrev, &mut state);
    assert_eq!(state.form.selected, 1);
    EventHandler::process_event(AppEvent::FormNext, &mut state);
    assert_eq!(state.form.selected, 0);
}
