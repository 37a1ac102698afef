// ABOUTME: HTTP client for the Anubis platform API's Cloud IDE endpoints

use crate::api::envelope::{normalize, Normalized};
use crate::api::ApiError;
use crate::models::{IdeSettings, Session};
use anyhow::{Context, Result};
use reqwest::header;
use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Quota check payload. The backend answers `session_available` in some
/// variants and `sessions_available` in others; both spellings decode.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailablePayload {
    #[serde(alias = "session_available")]
    pub sessions_available: bool,
}

/// Active-session lookup payload. The admin variant also reports the
/// settings the session was launched with.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivePayload {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub settings: Option<IdeSettings>,
}

/// Initialize payload. `settings` is present when the server normalized or
/// defaulted fields of a custom launch; `session` is absent when the launch
/// was refused.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InitializePayload {
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub settings: Option<IdeSettings>,
}

/// One poll tick's answer: still loading, or here is the session.
#[derive(Debug, Clone, Deserialize)]
pub struct PollPayload {
    pub loading: bool,
    #[serde(default)]
    pub session: Option<Session>,
}

/// Payload for endpoints that answer with a bare status note.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Acknowledged {}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsPayload {
    #[serde(default)]
    pub settings: IdeSettings,
}

/// Requested options for a student assignment launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitializeOptions {
    pub autosave: bool,
    pub persistent_storage: bool,
}

impl Default for InitializeOptions {
    fn default() -> Self {
        Self {
            autosave: true,
            persistent_storage: false,
        }
    }
}

/// Thin wrapper over reqwest carrying the base URL and the auth token. The
/// token travels both as a bearer header and as the `token` cookie the
/// backend's auth layer accepts.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .with_context(|| format!("invalid anubis api url: {base_url}"))?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("anubis-ide/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("failed to create http client")?;

        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        mut request: RequestBuilder,
    ) -> Result<Normalized<T>, ApiError> {
        if let Some(token) = &self.token {
            request = request
                .bearer_auth(token)
                .header(header::COOKIE, format!("token={token}"));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        normalize(status, &body)
    }

    /// `GET /public/ide/available` — whether the cluster has room for
    /// another session.
    pub async fn sessions_available(&self) -> Result<Normalized<AvailablePayload>, ApiError> {
        debug!("checking ide availability");
        self.send(self.http.get(self.endpoint("/public/ide/available")))
            .await
    }

    /// `GET /public/ide/active/:assignment_id`
    pub async fn active_session(
        &self,
        assignment_id: &str,
    ) -> Result<Normalized<ActivePayload>, ApiError> {
        debug!(assignment_id, "fetching active session");
        self.send(
            self.http
                .get(self.endpoint(&format!("/public/ide/active/{assignment_id}"))),
        )
        .await
    }

    /// `GET /admin/ide/active`
    pub async fn active_session_admin(&self) -> Result<Normalized<ActivePayload>, ApiError> {
        debug!("fetching active admin session");
        self.send(self.http.get(self.endpoint("/admin/ide/active")))
            .await
    }

    /// `POST /public/ide/initialize/:assignment_id`
    pub async fn initialize(
        &self,
        assignment_id: &str,
        options: &InitializeOptions,
    ) -> Result<Normalized<InitializePayload>, ApiError> {
        debug!(assignment_id, "initializing ide session");
        self.send(
            self.http
                .post(self.endpoint(&format!("/public/ide/initialize/{assignment_id}")))
                .json(options),
        )
        .await
    }

    /// `GET /admin/ide/initialize`
    pub async fn initialize_admin(&self) -> Result<Normalized<InitializePayload>, ApiError> {
        debug!("initializing admin ide session");
        self.send(self.http.get(self.endpoint("/admin/ide/initialize")))
            .await
    }

    /// `POST /admin/ide/initialize-custom` with a `{settings}` body.
    pub async fn initialize_custom(
        &self,
        settings: &IdeSettings,
    ) -> Result<Normalized<InitializePayload>, ApiError> {
        debug!("initializing custom admin ide session");
        self.send(
            self.http
                .post(self.endpoint("/admin/ide/initialize-custom"))
                .json(&serde_json::json!({ "settings": settings })),
        )
        .await
    }

    /// `GET /public/ide/poll/:session_id`
    pub async fn poll(&self, session_id: &str) -> Result<Normalized<PollPayload>, ApiError> {
        debug!(session_id, "polling ide session");
        self.send(
            self.http
                .get(self.endpoint(&format!("/public/ide/poll/{session_id}"))),
        )
        .await
    }

    /// `GET /public/ide/stop/:session_id` or the `/admin/` twin.
    pub async fn stop(
        &self,
        session_id: &str,
        admin: bool,
    ) -> Result<Normalized<Acknowledged>, ApiError> {
        let scope = if admin { "admin" } else { "public" };
        debug!(session_id, scope, "stopping ide session");
        self.send(
            self.http
                .get(self.endpoint(&format!("/{scope}/ide/stop/{session_id}"))),
        )
        .await
    }

    /// `GET /admin/ide/settings` — server defaults for the settings form.
    pub async fn default_settings(&self) -> Result<Normalized<SettingsPayload>, ApiError> {
        debug!("fetching default ide settings");
        self.send(self.http.get(self.endpoint("/admin/ide/settings")))
            .await
    }
}
