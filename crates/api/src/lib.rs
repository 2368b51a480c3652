//! # Pathwise App
//!
//! Application layer - commands and main entry point.
//!
//! This crate contains:
//! - Commands (one per user action, returning view models)
//! - Application context (dependency injection)
//! - Logging setup and command execution helpers
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
