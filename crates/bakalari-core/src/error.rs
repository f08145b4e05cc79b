//! Error types for the Bakaláři client
//!
//! Every failure is local to the call that produced it; nothing is retried.
//! BakalariError implements Serialize so callers can hand it to JSON front-ends.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for Bakaláři client operations
#[derive(Error, Debug)]
pub enum BakalariError {
    /// The server rejected the credentials or refresh token
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// An API call was made before a successful login
    #[error("Not logged in - call login() first")]
    NotLoggedIn,

    /// The server rejected the access token (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The server rejected the request (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Requested resource was not found (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status
    #[error("Unexpected HTTP status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    /// Network or transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with something other than JSON
    #[error("Expected application/json, got {0}")]
    UnexpectedContentType(String),

    /// The payload did not have the expected shape
    #[error("Failed to deserialize response: {0}")]
    Deserialization(String),

    /// The configured route is not a valid base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A prediction edit referenced a mark that does not exist
    #[error("Mark index out of range: {0}")]
    MarkIndexOutOfRange(usize),

    /// Writing a downloaded attachment failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BakalariError {
    /// Whether the error was caused by an unexpected payload shape.
    pub fn is_deserialization(&self) -> bool {
        matches!(self, BakalariError::Deserialization(_))
    }
}

impl From<serde_json::Error> for BakalariError {
    fn from(err: serde_json::Error) -> Self {
        BakalariError::Deserialization(err.to_string())
    }
}

/// Serialize BakalariError as its display string
impl Serialize for BakalariError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for Bakaláři client operations
pub type Result<T> = std::result::Result<T, BakalariError>;
