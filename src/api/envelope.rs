// ABOUTME: Normalizer for the uniform response envelope all Anubis endpoints share

use crate::api::ApiError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

/// Severity of a server-sent status message, picked by the envelope's
/// `variant` field (defaults to success).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoteLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            NoteLevel::Success => "success",
            NoteLevel::Info => "info",
            NoteLevel::Warning => "warning",
            NoteLevel::Error => "error",
        }
    }

    fn from_variant(variant: Option<&str>) -> Self {
        match variant {
            Some("error") => NoteLevel::Error,
            Some("warning") => NoteLevel::Warning,
            Some("info") => NoteLevel::Info,
            _ => NoteLevel::Success,
        }
    }
}

/// Human-readable status message carried alongside a successful payload,
/// e.g. "Session created" or "Session stopped.".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusNote {
    pub message: String,
    pub level: NoteLevel,
}

/// A decoded payload plus the status note the server attached to it.
#[derive(Debug, Clone)]
pub struct Normalized<T> {
    pub data: T,
    pub note: Option<StatusNote>,
}

#[derive(Debug, Deserialize)]
struct InnerEnvelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    variant: Option<String>,
    #[serde(flatten)]
    rest: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct OuterEnvelope {
    data: InnerEnvelope,
}

/// Unwrap one `{"data": {status?, error?, variant?, ...fields}}` envelope.
///
/// - 401 is an authorization failure, full stop.
/// - Any other non-200 status is treated uniformly as unrecoverable.
/// - A non-empty `error` string inside a 200 envelope short-circuits: the
///   embedded fields are never surfaced to the caller.
/// - Otherwise the remaining fields decode into `T` and any `status`
///   message rides along as a note.
pub fn normalize<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<Normalized<T>, ApiError> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    if status != StatusCode::OK {
        debug!(%status, "non-200 response from api");
        return Err(ApiError::Unrecognized);
    }

    let envelope: OuterEnvelope =
        serde_json::from_str(body).map_err(|_| ApiError::Unrecognized)?;
    let inner = envelope.data;

    if let Some(error) = inner.error {
        if !error.is_empty() {
            return Err(ApiError::Server(error));
        }
    }

    let note = inner.status.map(|message| StatusNote {
        message,
        level: NoteLevel::from_variant(inner.variant.as_deref()),
    });

    let data: T = serde_json::from_value(serde_json::Value::Object(inner.rest))
        .map_err(|_| ApiError::Unrecognized)?;

    Ok(Normalized { data, note })
}
