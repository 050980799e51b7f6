use serde::Deserialize;
use thoughtcache_core::error::CoreError;

/// Errors surfaced by the client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Input rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    /// The API answered with a non-2xx status.
    #[error("API error ({status}): {error}")]
    Api {
        status: u16,
        /// Human-readable `error` field of the response body.
        error: String,
        /// Upstream detail (`message` field), present on persistence failures.
        message: Option<String>,
    },

    /// The request never produced a response (connect, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response body did not have the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(String),

    /// The local preference file could not be read or written.
    #[error("Preference storage error: {0}")]
    Storage(String),

    /// The clipboard refused the write.
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
}

/// Error body shape returned by the API: `{ error, code, message? }`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
    #[allow(dead_code)]
    pub code: Option<String>,
    pub message: Option<String>,
}

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => ClientError::Validation(msg),
            other => ClientError::Validation(other.to_string()),
        }
    }
}

impl ClientError {
    /// Message suitable for a transient notification.
    ///
    /// Prefers the upstream detail of an API error over its generic summary.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::Api { error, .. } => error.clone(),
            ClientError::Validation(msg) => msg.clone(),
            ClientError::Transport(_) => "Unable to reach the server".to_string(),
            other => other.to_string(),
        }
    }

    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
