//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Generic message shown for transport and server failures.
pub const TRY_AGAIN_LATER: &str = "Something went wrong. Please try again later.";

/// Main error type for Pathwise
///
/// The first four variants are the taxonomy every view renders inline; the
/// remaining ones cover local concerns (configuration, credential storage,
/// client-side validation).
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PathwiseError {
    /// Invalid credentials or an expired session.
    #[error("Authentication rejected: {0}")]
    AuthRejected(String),

    /// The server rejected malformed input.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// The requested resource does not exist (yet).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network, server or response parsing problem.
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// Rejected on the client before any request was issued.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PathwiseError {
    /// Message suitable for inline display.
    ///
    /// Transport and internal failures never leak their cause; the cause is
    /// logged where the error is created.
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthRejected(msg)
            | Self::ValidationFailed(msg)
            | Self::NotFound(msg)
            | Self::InvalidInput(msg) => msg.clone(),
            Self::Transport(_) | Self::Internal(_) | Self::Storage(_) => {
                TRY_AGAIN_LATER.to_string()
            }
            Self::Config(msg) => format!("Configuration problem: {msg}"),
        }
    }

    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AuthRejected(_) => "auth_rejected",
            Self::ValidationFailed(_) => "validation_failed",
            Self::NotFound(_) => "not_found",
            Self::Transport(_) => "transport",
            Self::Config(_) => "config",
            Self::Storage(_) => "storage",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether the session must be dropped and the user sent to login.
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::AuthRejected(_))
    }
}

/// Result type alias for Pathwise operations
pub type Result<T> = std::result::Result<T, PathwiseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_hide_their_cause() {
        let err = PathwiseError::Transport("connection refused (os error 111)".into());
        assert_eq!(err.user_message(), TRY_AGAIN_LATER);
        assert_eq!(err.label(), "transport");
    }

    #[test]
    fn validation_messages_are_shown_verbatim() {
        let err = PathwiseError::ValidationFailed("Invalid interests data".into());
        assert_eq!(err.user_message(), "Invalid interests data");
        assert!(!err.requires_login());
    }

    #[test]
    fn only_auth_rejection_requires_login() {
        assert!(PathwiseError::AuthRejected("expired".into()).requires_login());
        assert!(!PathwiseError::NotFound("page".into()).requires_login());
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(PathwiseError::NotFound("Page 2 not found".into()))
            .expect("serialize");
        assert_eq!(json["type"], "NotFound");
        assert_eq!(json["message"], "Page 2 not found");
    }
}
