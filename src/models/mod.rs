// ABOUTME: Core data models for Anubis Cloud IDE sessions and launch settings

pub mod session;
pub mod settings;

pub use session::{Session, SessionState};
pub use settings::{IdeSettings, SettingEdit, SettingValue};
