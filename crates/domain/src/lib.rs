//! # Pathwise Domain
//!
//! Business domain types and models for the Pathwise career-guidance client.
//!
//! This crate contains:
//! - Wire-level data types (users, career tracks, onboarding questions,
//!   learning pages)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Pathwise crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
