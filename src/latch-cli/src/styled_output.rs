//! Styled CLI output with theme-aware colors.
//!
//! Respects the NO_COLOR environment variable and falls back to plain text
//! when the output is not a terminal.

use std::io::IsTerminal;

use crate::cli::ColorMode;

/// Check if colors should be disabled based on NO_COLOR env var.
fn colors_disabled() -> bool {
    std::env::var("NO_COLOR")
        .map(|v| !v.is_empty() && v != "0" && v.to_lowercase() != "false")
        .unwrap_or(false)
}

/// Decide whether stdout output should carry ANSI colors.
pub fn use_colors(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => !colors_disabled() && std::io::stdout().is_terminal(),
    }
}

/// ANSI color codes for light terminal backgrounds.
mod light_theme {
    pub const SUCCESS: &str = "\x1b[38;2;0;150;125m";
    pub const ERROR: &str = "\x1b[38;2;217;61;61m";
    pub const WARNING: &str = "\x1b[38;2;201;154;46m";
    pub const INFO: &str = "\x1b[38;2;0;100;160m";
    pub const DIM: &str = "\x1b[38;2;100;100;100m";
}

/// ANSI color codes for dark terminal backgrounds.
mod dark_theme {
    pub const SUCCESS: &str = "\x1b[38;2;0;245;212m";
    pub const ERROR: &str = "\x1b[38;2;255;107;107m";
    pub const WARNING: &str = "\x1b[38;2;255;200;87m";
    pub const INFO: &str = "\x1b[38;2;72;202;228m";
    pub const DIM: &str = "\x1b[38;2;130;154;177m";
}

const RESET: &str = "\x1b[0m";

/// Detect a light background from COLORFGBG ("fg;bg", bg 7+ is light).
fn is_light_theme() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|v| v.split(';').next_back().and_then(|bg| bg.parse::<u8>().ok()))
        .map(|bg| bg >= 7)
        .unwrap_or(false)
}

/// Message type for styled output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
    Warning,
    Info,
    Dim,
}

impl MessageType {
    fn icon(&self) -> &'static str {
        match self {
            MessageType::Success => "[OK]",
            MessageType::Error => "[ERROR]",
            MessageType::Warning => "[WARN]",
            MessageType::Info => "[INFO]",
            MessageType::Dim => "-",
        }
    }

    fn color(&self) -> &'static str {
        let light = is_light_theme();
        match (self, light) {
            (MessageType::Success, true) => light_theme::SUCCESS,
            (MessageType::Error, true) => light_theme::ERROR,
            (MessageType::Warning, true) => light_theme::WARNING,
            (MessageType::Info, true) => light_theme::INFO,
            (MessageType::Dim, true) => light_theme::DIM,
            (MessageType::Success, false) => dark_theme::SUCCESS,
            (MessageType::Error, false) => dark_theme::ERROR,
            (MessageType::Warning, false) => dark_theme::WARNING,
            (MessageType::Info, false) => dark_theme::INFO,
            (MessageType::Dim, false) => dark_theme::DIM,
        }
    }
}

/// Format `message` with the icon for `msg_type`, colored when `colors` is set.
pub fn format_styled(msg_type: MessageType, message: &str, colors: bool) -> String {
    if colors {
        format!("{}{} {}{}", msg_type.color(), msg_type.icon(), message, RESET)
    } else {
        format!("{} {}", msg_type.icon(), message)
    }
}

/// Print an error message to stderr.
pub fn print_error(message: &str) {
    let colors = !colors_disabled() && std::io::stderr().is_terminal();
    eprintln!("{}", format_styled(MessageType::Error, message, colors));
}

/// Print a message to stdout.
pub fn println_styled(msg_type: MessageType, message: &str, colors: bool) {
    println!("{}", format_styled(msg_type, message, colors));
}
