//! Commands - one per user action of each view
//!
//! A command takes the [`AppContext`](crate::AppContext) plus its input and
//! returns a serializable view model or a [`ViewError`] for inline display.

mod auth;
mod challenge;
mod dashboard;
mod learning;
mod navigation;
mod onboarding;

use pathwise_common::auth::AuthError;
use pathwise_core::Route;
use pathwise_domain::{PathwiseError, TRY_AGAIN_LATER};
use serde::Serialize;
use thiserror::Error;

pub use auth::*;
pub use challenge::*;
pub use dashboard::*;
pub use learning::*;
pub use navigation::*;
pub use onboarding::*;

/// Inline error rendered by a view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct ViewError {
    /// Stable label (`auth_rejected`, `not_found`, `redirect`, ...).
    pub kind: &'static str,
    pub message: String,
    /// Path the view should navigate to instead of rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

pub type CommandResult<T> = Result<T, ViewError>;

impl ViewError {
    pub fn redirect(to: Route) -> Self {
        Self { kind: "redirect", message: format!("Redirecting to {to}"), redirect: Some(to.path()) }
    }

    pub fn loading() -> Self {
        Self { kind: "loading", message: "Checking your session...".into(), redirect: None }
    }

    pub fn is_redirect(&self) -> bool {
        self.redirect.is_some()
    }
}

impl From<PathwiseError> for ViewError {
    fn from(error: PathwiseError) -> Self {
        let redirect = error.requires_login().then(|| Route::Login.path());
        Self { kind: error.label(), message: error.user_message(), redirect }
    }
}

impl From<AuthError> for ViewError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Rejected(message) => Self { kind: "auth_rejected", message, redirect: None },
            AuthError::Invalid(message) => {
                Self { kind: "validation_failed", message, redirect: None }
            }
            AuthError::Unavailable(_) => {
                Self { kind: "transport", message: TRY_AGAIN_LATER.into(), redirect: None }
            }
        }
    }
}
