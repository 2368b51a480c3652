//! Modular common utilities shared across Pathwise crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: error types and serde support
//! - `runtime`: async session management (auth)
//! - `platform`: platform integrations (keychain-backed credential storage)
//! - `observability`: tracing (pulled in by `runtime`)
//! - `test-utils`: in-memory mocks for the auth and keychain seams

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod auth;

// Platform tier
// -------------------------------------------------------------------
#[cfg(feature = "platform")]
pub mod security;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(all(feature = "runtime", any(feature = "test-utils", test)))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "runtime")]
pub use auth::{
    AuthClientTrait, AuthError, Credential, CredentialStore, MemoryCredentialStore, SessionState,
    SessionStore,
};
#[cfg(feature = "platform")]
pub use security::{KeychainError, KeychainProvider};
