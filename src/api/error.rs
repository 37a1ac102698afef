// ABOUTME: Error taxonomy for calls against the Anubis API

use thiserror::Error;

/// Everything that can go wrong talking to the Anubis API. Every error is
/// terminal at the failing call; callers convert it to a notification or an
/// exit message and nothing bubbles further.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401. The browser client hard-redirects to the login page here;
    /// the terminal client tells the user to sign in and refresh the token.
    #[error("not signed in to anubis (token missing or expired), run `anubis-ide` after updating the token in ~/.anubis/config.toml")]
    Unauthorized,

    /// Business error reported inside a 200 envelope. The embedded payload,
    /// if any, must not be used.
    #[error("{0}")]
    Server(String),

    /// Non-200 status or a body that does not match the envelope shape.
    #[error("unrecognized response from the anubis api")]
    Unrecognized,

    /// Network-level failure out of reqwest.
    #[error("request to the anubis api failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}
