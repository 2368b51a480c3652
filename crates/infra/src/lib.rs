//! # Pathwise Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP transport and the REST API client
//! - Gateways implementing the `pathwise-core` ports
//! - Credential storage backends (keychain, file, memory)
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `pathwise-core` and `pathwise-common`
//! - Contains all "impure" code (network, filesystem, keychain)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod storage;

// Re-export commonly used items
pub use api::{ApiAuthClient, ApiClient, ApiError, ApiGateway, CredentialProvider};
pub use errors::InfraError;
pub use http::{HttpClient, RetryPolicy};
pub use storage::{build_credential_store, FileCredentialStore};
