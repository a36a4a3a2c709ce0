//! Error types used throughout the integration layer

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Edulink
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum EdulinkError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Credential exchange error: {0}")]
    AuthExchange(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Payment gateway error: {0}")]
    Payment(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl EdulinkError {
    /// True for failure classes that indicate the remote LMS is unreachable
    /// or misbehaving as an API. Read paths flip into degraded mode on these.
    pub fn triggers_offline(&self) -> bool {
        matches!(self, Self::Network(_) | Self::MalformedResponse(_))
    }

    /// True when the underlying cause was a request timeout. Timeouts carry a
    /// distinguishable reason inside the Network variant so callers can pick
    /// a retry or degrade strategy.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network(msg) if msg.contains("timed out"))
    }
}

/// Result type alias for Edulink operations
pub type Result<T> = std::result::Result<T, EdulinkError>;
