//! Session management for token-authenticated REST clients
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  SessionStore   │  Owns the live credential, publishes SessionState
//! └────────┬────────┘
//!          │
//!          ├──► AuthClientTrait   (token issue, registration, validation)
//!          │
//!          └──► CredentialStore   (durable storage under one fixed key)
//!                    │
//!                    ├──► KeychainCredentialStore  (platform keychain)
//!                    └──► MemoryCredentialStore    (process memory)
//! ```
//!
//! Views never read storage directly. They subscribe to the session's
//! `watch` channel and react to `SessionState` changes.
//!
//! # Module Organization
//!
//! - **[`types`]**: `Credential`, `SessionState`, `AuthError`
//! - **[`traits`]**: `AuthClientTrait`, `CredentialStore`
//! - **[`session`]**: `SessionStore`
//! - **[`memory`]**: in-memory credential storage

#[cfg(feature = "platform")]
mod keychain;
pub mod memory;
pub mod session;
pub mod traits;
pub mod types;

#[cfg(feature = "platform")]
pub use keychain::KeychainCredentialStore;
pub use memory::MemoryCredentialStore;
pub use session::SessionStore;
pub use traits::{AuthClientTrait, CredentialStore};
pub use types::{AuthError, Credential, SessionState};
