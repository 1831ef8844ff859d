//! Error types for the health tips collaborator
//!
//! The computational core (units, classification, gauge geometry) never
//! fails: it returns `Option` for incomplete input. Errors only exist at the
//! boundary to the text-generation backend and are turned into the fallback
//! payload by [`crate::tips::fetch_tips`].

use thiserror::Error;

/// Result type alias for tips operations
pub type Result<T> = std::result::Result<T, TipsError>;

/// Errors that can occur while generating health tips
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TipsError {
    /// Provider has no API key configured
    #[error("API key not configured")]
    MissingKey,

    /// Transport-level failure (connect, timeout, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Backend answered but carried no text
    #[error("Empty response from provider")]
    EmptyResponse,

    /// Response text was not valid JSON for the tips payload
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Response parsed but does not satisfy the payload contract
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl TipsError {
    /// Create a new `Api` error from a status code and body text
    #[must_use]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}
