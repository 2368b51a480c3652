//! Testing utilities
//!
//! In-memory stand-ins for the session's external seams:
//! - **[`MockAuthClient`]**: scripted token issue and validation
//! - **[`MockKeychainProvider`]**: keychain without touching the OS
//!   (`platform` feature)

pub mod mocks;

pub use mocks::MockAuthClient;
#[cfg(feature = "platform")]
pub use mocks::MockKeychainProvider;
