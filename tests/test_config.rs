// ABOUTME: Tests for config defaults, file round-trips, and poll tuning

use anubis_ide::config::AppConfig;
use pretty_assertions::assert_eq;
use std::time::Duration;

#[test]
fn test_defaults_match_the_hosted_deployment() {
    let config = AppConfig::default();

    assert_eq!(config.api_url, "https://anubis.osiris.services/api");
    assert!(config.token.is_none());
    assert_eq!(config.poll.interval_ms, 1000);
    assert_eq!(config.poll.max_attempts, 60);
    assert_eq!(config.poll.watch_max_attempts, 600);
    assert_eq!(config.poll.reveal_stop_after, 30);
}

#[test]
fn test_empty_file_parses_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "").unwrap();

    let config = AppConfig::load_from(&path).unwrap();
    assert_eq!(config.api_url, AppConfig::default().api_url);
    assert_eq!(config.poll.max_attempts, 60);
}

#[test]
fn test_partial_file_keeps_unnamed_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "api_url = \"http://localhost:5000\"\n\n[poll]\nmax_attempts = 5\n",
    )
    .unwrap();

    let config = AppConfig::load_from(&path).unwrap();
    assert_eq!(config.api_url, "http://localhost:5000");
    assert_eq!(config.poll.max_attempts, 5);
    assert_eq!(config.poll.watch_max_attempts, 600);
}

#[test]
fn test_save_and_reload_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = AppConfig::default();
    config.token = Some("secret".to_string());
    config.poll.interval_ms = 250;
    config.save_to(&path).unwrap();

    let reloaded = AppConfig::load_from(&path).unwrap();
    assert_eq!(reloaded.token.as_deref(), Some("secret"));
    assert_eq!(reloaded.poll.interval_ms, 250);
}

#[test]
fn test_pollers_reflect_the_tuning() {
    let mut config = AppConfig::default();
    config.poll.interval_ms = 500;
    config.poll.max_attempts = 10;
    config.poll.watch_max_attempts = 100;
    config.poll.reveal_stop_after = 7;

    let launch = config.launch_poller();
    assert_eq!(launch.interval, Duration::from_millis(500));
    assert_eq!(launch.max_attempts, 10);
    assert_eq!(launch.reveal_stop_after, None);

    let watch = config.watch_poller();
    assert_eq!(watch.max_attempts, 100);
    assert_eq!(watch.reveal_stop_after, Some(7));
}
