//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when calling the shop API.
///
/// The variants keep the cause for logs. Screens do not branch on them:
/// any failure becomes one user-facing notice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to send the request or read the response.
    #[error("Request failed: {0}")]
    Request(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// Non-2xx HTTP response.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The API answered with `success: false`.
    #[error("Rejected by server: {0}")]
    Rejected(String),

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse the response body.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Failed to serialize the request body.
    #[error("Failed to encode request: {0}")]
    Encode(String),
}

impl FetchError {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound(_))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Encode(e.to_string())
    }
}

/// Errors while resolving client configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting is absent.
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    /// A setting has an unusable value.
    #[error("Invalid configuration value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}
