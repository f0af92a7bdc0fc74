//! Latch CLI library.
//!
//! - `cli/` - argument parsing and command dispatch
//! - [`shell`] - the interactive sign-up / sign-in shell
//! - [`config`] - `config.toml` loading
//! - [`logging`] - tracing setup
//! - [`styled_output`] - colored status lines

pub mod cli;
pub mod config;
pub mod logging;
pub mod shell;
pub mod styled_output;

pub use cli::{AppContext, Cli, dispatch_command};
pub use config::{ConfigError, LatchConfig};
pub use shell::Shell;
