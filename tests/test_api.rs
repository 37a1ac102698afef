// ABOUTME: Tests for envelope decoding against real endpoint payload shapes

use anubis_ide::api::{normalize, ActivePayload, AvailablePayload, PollPayload, SettingsPayload};
use anubis_ide::models::{SessionState, SettingValue};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;

#[test]
fn test_quota_payload_accepts_both_field_spellings() {
    let singular =
        normalize::<AvailablePayload>(StatusCode::OK, r#"{"data": {"session_available": true}}"#)
            .unwrap();
    let plural =
        normalize::<AvailablePayload>(StatusCode::OK, r#"{"data": {"sessions_available": false}}"#)
            .unwrap();

    assert!(singular.data.sessions_available);
    assert!(!plural.data.sessions_available);
}

#[test]
fn test_active_payload_with_admin_settings() {
    let body = r#"{"data": {
        "active": true,
        "session": {"id": "s1", "state": "Running"},
        "settings": {"image": "registry/theia-admin", "privileged": true}
    }}"#;
    let normalized = normalize::<ActivePayload>(StatusCode::OK, body).unwrap();

    assert!(normalized.data.active);
    assert_eq!(normalized.data.session.unwrap().state, SessionState::Running);
    let settings = normalized.data.settings.unwrap();
    assert_eq!(
        settings.get("image"),
        Some(&SettingValue::Text("registry/theia-admin".to_string()))
    );
    assert_eq!(settings.get("privileged"), Some(&SettingValue::Flag(true)));
}

#[test]
fn test_poll_payload_while_still_loading() {
    let body = r#"{"data": {
        "loading": true,
        "session": {"id": "s1", "state": "Initializing"}
    }}"#;
    let normalized = normalize::<PollPayload>(StatusCode::OK, body).unwrap();

    assert!(normalized.data.loading);
    assert!(normalized.data.session.unwrap().is_transient());
}

#[test]
fn test_settings_payload_defaults_to_empty_map() {
    let normalized = normalize::<SettingsPayload>(StatusCode::OK, r#"{"data": {}}"#).unwrap();
    assert!(normalized.data.settings.is_empty());
}
