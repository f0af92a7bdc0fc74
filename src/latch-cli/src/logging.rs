//! Tracing setup. Logs always go to stderr so they never mix with the shell.

use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, reload};

use crate::cli::{Cli, LogLevel};
use crate::config::LatchConfig;

/// Environment variable selecting the log level.
pub const LOG_LEVEL_ENV_VAR: &str = "LATCH_LOG_LEVEL";

/// Pick the log level: `--verbose`, then `--log-level`, then `LATCH_LOG_LEVEL`,
/// then `log_level` from config, then [`LogLevel::Warn`].
pub fn resolve_log_level(cli: &Cli, env_level: Option<&str>, config: &LatchConfig) -> LogLevel {
    if cli.verbose {
        return LogLevel::Debug;
    }
    cli.log_level
        .or_else(|| env_level.and_then(LogLevel::from_str_loose))
        .or_else(|| config.log_level.as_deref().and_then(LogLevel::from_str_loose))
        .unwrap_or_default()
}

/// Filter reload handle returned by [`init`].
pub struct LogHandle {
    handle: reload::Handle<EnvFilter, Registry>,
    pinned: bool,
}

impl LogHandle {
    /// Apply `log_level` from config unless the command line or environment
    /// already chose a level.
    pub fn apply_config(&self, config: &LatchConfig) {
        if self.pinned {
            return;
        }
        let Some(level) = config.log_level.as_deref().and_then(LogLevel::from_str_loose) else {
            return;
        };
        if let Err(e) = self.handle.reload(EnvFilter::new(level.as_filter_str())) {
            warn!(error = %e, "Failed to apply configured log level");
        }
    }
}

/// Install the global subscriber before anything else logs.
///
/// `RUST_LOG` wins when set and no level was given on the command line.
pub fn init(cli: &Cli) -> LogHandle {
    let env_level = std::env::var(LOG_LEVEL_ENV_VAR).ok();
    let rust_log = std::env::var("RUST_LOG").ok().filter(|d| !d.is_empty());
    let (filter, pinned) = startup_filter(cli, env_level.as_deref(), rust_log);

    let (filter, handle) = reload::Layer::new(EnvFilter::new(filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    LogHandle { handle, pinned }
}

/// Filter directives before config is known, and whether config may override them.
fn startup_filter(cli: &Cli, env_level: Option<&str>, rust_log: Option<String>) -> (String, bool) {
    let explicit = cli.verbose || cli.log_level.is_some();
    if !explicit && let Some(directives) = rust_log {
        return (directives, true);
    }
    let pinned = explicit || env_level.and_then(LogLevel::from_str_loose).is_some();
    let level = resolve_log_level(cli, env_level, &LatchConfig::default());
    (level.as_filter_str().to_string(), pinned)
}
