//! Security primitives
//!
//! Generic secret storage backed by the platform keychain. Session-specific
//! helpers live in `auth::keychain`.

pub mod keychain;

pub use keychain::{KeychainError, KeychainProvider};
