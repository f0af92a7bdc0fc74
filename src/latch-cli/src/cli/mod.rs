//! CLI argument parsing and command dispatch.
//!
//! - `args` - Command-line argument structures
//! - `handlers` - Command execution handlers

pub mod args;
pub mod handlers;

pub use args::{BackendArg, Cli, ColorMode, Commands, LogLevel};
pub use handlers::{AppContext, dispatch_command};
