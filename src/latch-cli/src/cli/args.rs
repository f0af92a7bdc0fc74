//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use latch_session_store::SlotBackend;

/// Log verbosity level for CLI output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors (default)
    #[default]
    Warn,
    /// Show informational messages, warnings, and errors
    Info,
    /// Show debug messages and above
    Debug,
    /// Show all messages including trace-level details
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<LogLevel> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// Color output mode for CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    /// Automatically detect if output is a terminal
    #[default]
    Auto,
    /// Always output with colors
    Always,
    /// Never output with colors
    Never,
}

/// Where the signed-in session is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BackendArg {
    /// JSON file under the Latch home directory
    File,
    /// OS keychain (Keychain, Secret Service, Credential Manager)
    Keyring,
    /// In-process only, nothing survives exit
    Memory,
}

impl From<BackendArg> for SlotBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::File => SlotBackend::File,
            BackendArg::Keyring => SlotBackend::Keyring,
            BackendArg::Memory => SlotBackend::Memory,
        }
    }
}

/// Latch - email/password sign-in shell
///
/// If no subcommand is specified, starts the interactive shell.
#[derive(Debug, Parser)]
#[command(name = "latch", version, about = "Latch - sign up, sign in, stay signed in")]
pub struct Cli {
    /// Enable verbose output (same as --log-level debug)
    #[arg(long = "verbose", short = 'v', global = true)]
    pub verbose: bool,

    /// Log verbosity level. Logs go to stderr.
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Color output mode
    #[arg(long = "color", value_enum, default_value_t = ColorMode::Auto, global = true)]
    pub color: ColorMode,

    /// Session storage backend, overriding config.toml
    #[arg(long = "backend", value_enum, global = true)]
    pub backend: Option<BackendArg>,

    /// Latch home directory (config.toml and the session directory)
    #[arg(long = "home", env = "LATCH_HOME", global = true)]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the interactive shell (the default)
    Shell,

    /// Show whether a session is saved
    Status,

    /// Delete the saved session without starting the shell
    #[command(visible_alias = "logout")]
    Forget,
}
