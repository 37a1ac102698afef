// ABOUTME: Unit tests for the session data model and its state label handling

use anubis_ide::models::{Session, SessionState};
use pretty_assertions::assert_eq;

#[test]
fn test_state_labels_round_trip() {
    for label in ["Initializing", "Running", "Ending", "Ended", "Stopped", "Failed"] {
        let state = SessionState::from(label.to_string());
        assert_eq!(state.label(), label);
    }
}

#[test]
fn test_unknown_labels_are_preserved() {
    let state = SessionState::from("Scheduling".to_string());
    assert_eq!(state, SessionState::Other("Scheduling".to_string()));
    assert_eq!(state.label(), "Scheduling");
    assert!(state.is_transient());
}

#[test]
fn test_transient_set_matches_the_poll_loop_contract() {
    assert!(SessionState::Initializing.is_transient());
    assert!(SessionState::Ending.is_transient());
    assert!(!SessionState::Running.is_transient());
    assert!(!SessionState::Ended.is_transient());
    assert!(!SessionState::Stopped.is_transient());
    assert!(!SessionState::Failed.is_transient());
}

#[test]
fn test_state_indicator() {
    assert_eq!(SessionState::Running.indicator(), "●");
    assert_eq!(SessionState::Stopped.indicator(), "⏸");
    assert_eq!(SessionState::Failed.indicator(), "✗");
}

#[test]
fn test_session_decodes_with_minimal_fields() {
    let session: Session = serde_json::from_str(
        r#"{"id": "abc123", "state": "Initializing"}"#,
    )
    .unwrap();

    assert_eq!(session.id, "abc123");
    assert_eq!(session.state, SessionState::Initializing);
    assert!(session.redirect_url.is_none());
    assert!(session.autosave);
    assert!(session.persistent_storage.is_none());
    assert!(session.is_transient());
    assert!(!session.is_running());
}

#[test]
fn test_session_decodes_full_record() {
    let session: Session = serde_json::from_str(
        r#"{
            "id": "abc123",
            "state": "Running",
            "redirect_url": "https://ide.anubis.test/initialize?token=t",
            "created": "Mon Aug 31 2026",
            "autosave": false,
            "persistent_storage": true,
            "repo_url": "https://github.com/org/assignment-1"
        }"#,
    )
    .unwrap();

    assert!(session.is_running());
    assert!(!session.autosave);
    assert_eq!(session.persistent_storage, Some(true));
    assert_eq!(
        session.redirect_url.as_deref(),
        Some("https://ide.anubis.test/initialize?token=t")
    );
    assert_eq!(session.created.as_deref(), Some("Mon Aug 31 2026"));
}
