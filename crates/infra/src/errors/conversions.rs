//! Third-party failures classified into `PathwiseError`
//!
//! Infra code wraps `reqwest`, io and JSON errors in [`InfraError`] and lets
//! `?` turn them into the domain error. Raw causes end up in the error text
//! for logs; views only ever show `PathwiseError::user_message`.

use std::io;

use pathwise_domain::PathwiseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<InfraError> for PathwiseError {
    fn from(err: InfraError) -> Self {
        match err {
            InfraError::Http(e) => classify_http(&e),
            InfraError::Io(e) => Self::Storage(format!("{}: {e}", e.kind())),
            InfraError::Json(e) => {
                Self::Storage(format!("malformed JSON at {}:{}: {e}", e.line(), e.column()))
            }
        }
    }
}

fn classify_http(err: &reqwest::Error) -> PathwiseError {
    if err.is_builder() {
        return PathwiseError::Internal(format!("unbuildable request: {err}"));
    }
    if let Some(status) = err.status() {
        let text = format!("HTTP {status}");
        return match status.as_u16() {
            401 | 403 => PathwiseError::AuthRejected(text),
            404 => PathwiseError::NotFound(text),
            400..=499 => PathwiseError::ValidationFailed(text),
            _ => PathwiseError::Transport(text),
        };
    }
    let cause = if err.is_timeout() {
        "request timed out"
    } else if err.is_connect() {
        "could not connect"
    } else if err.is_decode() {
        "response body could not be decoded"
    } else {
        "request failed"
    };
    PathwiseError::Transport(format!("{cause}: {err}"))
}
