//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for browsekit
///
/// API-level errors and warnings embedded in a successful response body are
/// not represented here; they are collected on the response and left for the
/// caller to inspect. [`BrowseError::Api`] only appears when a caller opts in
/// through `Connection::error_check`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum BrowseError {
    /// Missing or malformed configuration (credentials, config file contents).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The call itself cannot be built (unknown verb, missing path parameter).
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Token acquisition failed at the network or OAuth protocol level.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Transport failure while sending an API request.
    #[error("Network error: {0}")]
    Network(String),

    /// Errors reported by the API, surfaced on request.
    #[error("API error: {0}")]
    Api(String),

    /// A response or file could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for browsekit operations
pub type Result<T> = std::result::Result<T, BrowseError>;
