//! API-specific error types
//!
//! Classifies REST responses into the categories views act on.

use pathwise_common::AuthError;
use pathwise_domain::{PathwiseError, TRY_AGAIN_LATER};
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// 401/403: the credential is missing, wrong or expired
    Authentication,
    /// 404
    NotFound,
    /// Other 4xx: the server refused the submitted fields
    Validation,
    /// 5xx, network and parse failures
    Transport,
    /// Client misconfiguration (bad base URL, unbuildable request)
    Config,
}

/// API operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Authentication rejected: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Carries the message extracted from the response body.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::NotFound(_) => ApiErrorCategory::NotFound,
            Self::Validation(_) => ApiErrorCategory::Validation,
            Self::Server(_) | Self::Network(_) | Self::Decode(_) => ApiErrorCategory::Transport,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// Message safe to show; transport causes are replaced by a generic text.
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(msg) | Self::NotFound(msg) | Self::Validation(msg) => msg.clone(),
            Self::Server(_) | Self::Network(_) | Self::Decode(_) | Self::Config(_) => {
                TRY_AGAIN_LATER.to_string()
            }
        }
    }
}

impl From<ApiError> for PathwiseError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Auth(msg) => Self::AuthRejected(msg),
            ApiError::NotFound(msg) => Self::NotFound(msg),
            ApiError::Validation(msg) => Self::ValidationFailed(msg),
            ApiError::Server(msg) | ApiError::Network(msg) | ApiError::Decode(msg) => {
                Self::Transport(msg)
            }
            ApiError::Config(msg) => Self::Config(msg),
        }
    }
}

impl From<PathwiseError> for ApiError {
    fn from(err: PathwiseError) -> Self {
        match err {
            PathwiseError::AuthRejected(msg) => Self::Auth(msg),
            PathwiseError::NotFound(msg) => Self::NotFound(msg),
            PathwiseError::ValidationFailed(msg) | PathwiseError::InvalidInput(msg) => {
                Self::Validation(msg)
            }
            PathwiseError::Config(msg) | PathwiseError::Internal(msg) => Self::Config(msg),
            PathwiseError::Transport(msg) | PathwiseError::Storage(msg) => Self::Network(msg),
        }
    }
}

/// Session-facing view of an API failure.
impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        let message = err.user_message();
        match err.category() {
            ApiErrorCategory::Authentication => Self::Rejected(message),
            ApiErrorCategory::Validation | ApiErrorCategory::NotFound => Self::Invalid(message),
            ApiErrorCategory::Transport | ApiErrorCategory::Config => Self::Unavailable(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(ApiError::Auth("test".into()).category(), ApiErrorCategory::Authentication);
        assert_eq!(ApiError::NotFound("test".into()).category(), ApiErrorCategory::NotFound);
        assert_eq!(ApiError::Validation("test".into()).category(), ApiErrorCategory::Validation);
        assert_eq!(ApiError::Server("test".into()).category(), ApiErrorCategory::Transport);
        assert_eq!(ApiError::Decode("test".into()).category(), ApiErrorCategory::Transport);
    }

    #[test]
    fn transport_causes_are_not_shown() {
        let err = ApiError::Server("http://api/x returned 502: upstream".into());
        assert_eq!(err.user_message(), TRY_AGAIN_LATER);
        assert_eq!(
            ApiError::Validation("A user with that username already exists.".into()).user_message(),
            "A user with that username already exists."
        );
    }

    #[test]
    fn converts_to_domain_taxonomy() {
        assert_eq!(
            PathwiseError::from(ApiError::Auth("expired".into())),
            PathwiseError::AuthRejected("expired".into())
        );
        assert!(matches!(
            PathwiseError::from(ApiError::Network("refused".into())),
            PathwiseError::Transport(_)
        ));
    }

    #[test]
    fn converts_to_session_errors() {
        assert!(AuthError::from(ApiError::Auth("nope".into())).is_rejection());
        assert_eq!(
            AuthError::from(ApiError::Validation("Unable to log in.".into())),
            AuthError::Invalid("Unable to log in.".into())
        );
        assert_eq!(
            AuthError::from(ApiError::Server("boom".into())),
            AuthError::Unavailable(TRY_AGAIN_LATER.into())
        );
    }
}
