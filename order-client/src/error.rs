//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (network, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// WebSocket failure
    #[error("Socket error: {0}")]
    Socket(String),
}

impl ClientError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// True for errors the observer loop recovers from by reconnecting
    pub fn is_transient(&self) -> bool {
        matches!(self, ClientError::Http(_) | ClientError::Socket(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
