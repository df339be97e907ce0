//! Outcome classification for remote API calls.
//!
//! The remote API signals failure three different ways: transport errors,
//! non-2xx statuses, and 2xx bodies carrying `"success": false`. Callers
//! used to probe the decoded body for a `success` key themselves; this
//! enum makes the classification explicit so no caller can forget it.

/// A failed remote API call, classified by where it failed.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No API key is configured. Detected before any network call; no
    /// request is sent and nothing is logged.
    #[error("Remote API key is not configured")]
    NotConfigured,

    /// The request never produced an HTTP response.
    #[error("Connection error: {0}")]
    Transport(String),

    /// The remote API answered with an error status or an explicit
    /// `success: false` payload.
    #[error("{message}")]
    Remote { message: String, http_code: u16 },

    /// A 2xx response whose body was not the JSON shape we require.
    #[error("Invalid JSON response from remote API")]
    InvalidResponse { http_code: u16 },
}

impl GatewayError {
    /// HTTP status associated with the failure; 0 when no response
    /// was received.
    pub fn http_code(&self) -> u16 {
        match self {
            GatewayError::NotConfigured | GatewayError::Transport(_) => 0,
            GatewayError::Remote { http_code, .. } => *http_code,
            GatewayError::InvalidResponse { http_code } => *http_code,
        }
    }
}
