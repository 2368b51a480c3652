//! REST API access
//!
//! - [`ApiClient`]: request building, credential injection and response
//!   classification
//! - [`ApiAuthClient`]: login, registration and credential validation
//! - [`ApiGateway`]: implementations of the core ports

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod errors;
pub mod gateway;

pub use auth::ApiAuthClient;
pub use client::{extract_message, ApiClient, CredentialProvider};
pub use errors::{ApiError, ApiErrorCategory};
pub use gateway::ApiGateway;
