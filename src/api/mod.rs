// ABOUTME: Anubis API client, response-envelope handling, and error taxonomy

pub mod client;
pub mod envelope;
pub mod error;

pub use client::{
    Acknowledged, ActivePayload, ApiClient, AvailablePayload, InitializeOptions,
    InitializePayload, PollPayload, SettingsPayload,
};
pub use envelope::{normalize, NoteLevel, Normalized, StatusNote};
pub use error::ApiError;
