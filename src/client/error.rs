//! Client error types
//!
//! Every failure the backend client can report.

use thiserror::Error;

/// Errors that can occur when talking to the decision-support backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// Backend could not be reached
    #[error("Backend unavailable at {0}")]
    Unavailable(String),

    /// Request exceeded the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Any other transport-level failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Failed to decode response from {endpoint}: {error}")]
    Decode { endpoint: String, error: String },

    /// Prediction endpoint reported `success: false`
    #[error("Prediction failed: {0}")]
    Prediction(String),

    /// Input rejected before sending
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ClientError {
    /// Classify a reqwest error the way the rest of the client reports it
    pub(crate) fn from_transport(error: reqwest::Error, base_url: &str) -> Self {
        if error.is_timeout() {
            ClientError::Timeout
        } else if error.is_connect() {
            ClientError::Unavailable(base_url.to_string())
        } else {
            ClientError::Request(error)
        }
    }
}

/// Result alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
