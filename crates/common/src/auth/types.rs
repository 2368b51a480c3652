//! Session types
//!
//! The credential is an opaque server-issued token. It is never printed:
//! `Debug` is redacted and there is no `Display`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque bearer token issued by the API
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token for building the `Authorization` header or persisting it.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Observable session state
///
/// `Loading` lasts from construction until the stored credential has been
/// checked once. Guards render a loading state for it instead of redirecting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Loading,
    Anonymous,
    Authenticated(Credential),
}

impl SessionState {
    #[must_use]
    pub fn credential(&self) -> Option<&Credential> {
        match self {
            Self::Authenticated(credential) => Some(credential),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Error type for session operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Bad username/password or a credential the server no longer accepts
    #[error("{0}")]
    Rejected(String),

    /// The server refused the submitted fields (e.g. username taken)
    #[error("{0}")]
    Invalid(String),

    /// Network or server failure; the cause has already been logged
    #[error("{0}")]
    Unavailable(String),
}

impl AuthError {
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_debug_is_redacted() {
        let credential = Credential::new("abc123secret");
        let rendered = format!("{:?}", SessionState::Authenticated(credential));
        assert!(!rendered.contains("abc123secret"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn credential_serializes_as_bare_string() {
        let json = serde_json::to_string(&Credential::new("t0k")).unwrap();
        assert_eq!(json, "\"t0k\"");
    }

    #[test]
    fn state_accessors() {
        let authenticated = SessionState::Authenticated(Credential::new("t"));
        assert!(authenticated.is_authenticated());
        assert_eq!(authenticated.credential().map(Credential::expose), Some("t"));

        assert!(SessionState::default().is_loading());
        assert!(SessionState::Anonymous.credential().is_none());
    }
}
