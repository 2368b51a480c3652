//! Command plumbing shared by every command module

pub mod command_helpers;
pub mod logging;

pub use command_helpers::{authorize, execute_command, execute_guarded, execute_local};
pub use logging::{error_label, init_tracing, log_command_execution};
