//! Typed errors for the Kodisha API client.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can match
//! on the failure class and pick the right user-facing message.

use thiserror::Error;

/// Result type for Kodisha API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Failure classes for backend requests.
///
/// Classification order matters: connectivity signatures are checked first,
/// then "request sent but nothing came back", then anything that carries a
/// response, and only then the catch-all.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No connectivity: DNS failure, refused connection, or timeout.
    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),

    /// The request went out but no response ever arrived.
    #[error("server unresponsive: {0}")]
    ServerUnresponsive(String),

    /// The server answered with a failure status or an unreadable body.
    #[error("server error: {message}")]
    ServerError {
        status: Option<u16>,
        message: String,
    },

    /// Anything that fits none of the above signatures.
    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl ApiError {
    /// Human-readable message suitable for a toast or banner.
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::NetworkUnavailable(_) => {
                "No internet connection. Check your network and try again."
            }
            ApiError::ServerUnresponsive(_) => {
                "The server is taking too long to respond. Please try again."
            }
            ApiError::ServerError { .. } => {
                "Something went wrong on our side. Please try again shortly."
            }
            ApiError::Unknown(_) => "Something unexpected went wrong. Please try again.",
        }
    }

    /// HTTP status of the failed response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::ServerError { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            ApiError::NetworkUnavailable(err.to_string())
        } else if err.is_request() {
            ApiError::ServerUnresponsive(err.to_string())
        } else if err.is_decode() || err.status().is_some() {
            ApiError::ServerError {
                status: err.status().map(|s| s.as_u16()),
                message: err.to_string(),
            }
        } else {
            ApiError::Unknown(err.to_string())
        }
    }
}
