// ABOUTME: Session lifecycle core: launch, poll, stop against a pluggable API handle

pub mod launcher;
pub mod poller;
pub mod state;
pub mod stopper;

pub use launcher::{launch, refresh_active, LaunchOutcome};
pub use poller::{PollOutcome, Poller};
pub use state::{lock_state, shared_state, IdeState, Notice, PollGuard, SharedIdeState};
pub use stopper::{stop, StopOutcome};

use crate::api::{
    Acknowledged, ActivePayload, ApiClient, ApiError, AvailablePayload, InitializeOptions,
    InitializePayload, Normalized, PollPayload, SettingsPayload,
};
use crate::models::IdeSettings;

/// Which active-session endpoint a dialog watches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionScope {
    Assignment(String),
    Admin,
}

impl SessionScope {
    pub fn is_admin(&self) -> bool {
        matches!(self, SessionScope::Admin)
    }
}

/// What "Launch Session" should ask the server for.
#[derive(Debug, Clone, PartialEq)]
pub enum LaunchTarget {
    /// Student launch against one assignment.
    Assignment {
        assignment_id: String,
        options: InitializeOptions,
    },
    /// Admin launch with server-side default settings.
    AdminDefault,
    /// Admin launch posting an explicit settings body.
    AdminCustom(IdeSettings),
}

impl LaunchTarget {
    pub fn is_admin(&self) -> bool {
        !matches!(self, LaunchTarget::Assignment { .. })
    }

    pub fn scope(&self) -> SessionScope {
        match self {
            LaunchTarget::Assignment { assignment_id, .. } => {
                SessionScope::Assignment(assignment_id.clone())
            }
            LaunchTarget::AdminDefault | LaunchTarget::AdminCustom(_) => SessionScope::Admin,
        }
    }
}

/// The API surface the lifecycle functions need. [`ApiClient`] is the real
/// thing; tests script a fake.
#[allow(async_fn_in_trait)]
pub trait IdeApi {
    async fn sessions_available(&self) -> Result<Normalized<AvailablePayload>, ApiError>;
    async fn active(&self, scope: &SessionScope) -> Result<Normalized<ActivePayload>, ApiError>;
    async fn initialize(
        &self,
        target: &LaunchTarget,
    ) -> Result<Normalized<InitializePayload>, ApiError>;
    async fn poll(&self, session_id: &str) -> Result<Normalized<PollPayload>, ApiError>;
    async fn stop(
        &self,
        session_id: &str,
        admin: bool,
    ) -> Result<Normalized<Acknowledged>, ApiError>;
    async fn default_settings(&self) -> Result<Normalized<SettingsPayload>, ApiError>;
}

impl IdeApi for ApiClient {
    async fn sessions_available(&self) -> Result<Normalized<AvailablePayload>, ApiError> {
        ApiClient::sessions_available(self).await
    }

    async fn active(&self, scope: &SessionScope) -> Result<Normalized<ActivePayload>, ApiError> {
        match scope {
            SessionScope::Assignment(assignment_id) => {
                ApiClient::active_session(self, assignment_id).await
            }
            SessionScope::Admin => ApiClient::active_session_admin(self).await,
        }
    }

    async fn initialize(
        &self,
        target: &LaunchTarget,
    ) -> Result<Normalized<InitializePayload>, ApiError> {
        match target {
            LaunchTarget::Assignment {
                assignment_id,
                options,
            } => ApiClient::initialize(self, assignment_id, options).await,
            LaunchTarget::AdminDefault => ApiClient::initialize_admin(self).await,
            LaunchTarget::AdminCustom(settings) => {
                ApiClient::initialize_custom(self, settings).await
            }
        }
    }

    async fn poll(&self, session_id: &str) -> Result<Normalized<PollPayload>, ApiError> {
        ApiClient::poll(self, session_id).await
    }

    async fn stop(
        &self,
        session_id: &str,
        admin: bool,
    ) -> Result<Normalized<Acknowledged>, ApiError> {
        ApiClient::stop(self, session_id, admin).await
    }

    async fn default_settings(&self) -> Result<Normalized<SettingsPayload>, ApiError> {
        ApiClient::default_settings(self).await
    }
}
