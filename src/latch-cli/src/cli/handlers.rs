//! Command execution handlers.

use anyhow::{Context, Result};
use latch_auth::AuthController;
use latch_session_store::{SessionPersistence, SlotOptions, StorePaths, open_slot};
use tokio::io::BufReader;
use tracing::{debug, info};

use crate::cli::args::{Cli, Commands};
use crate::config::LatchConfig;
use crate::shell::Shell;
use crate::styled_output::{MessageType, println_styled, use_colors};

/// Everything a command needs: resolved paths, merged config, color choice.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub paths: StorePaths,
    pub config: LatchConfig,
    pub colors: bool,
}

impl AppContext {
    /// Resolve the home directory, load `config.toml` and apply CLI overrides.
    pub async fn resolve(cli: &Cli) -> Result<Self> {
        let paths = match &cli.home {
            Some(home) => StorePaths::from_root(home.clone()),
            None => StorePaths::new().context("Could not determine the Latch home directory")?,
        };

        let mut config = LatchConfig::load(&paths.config_file).await?;
        if let Some(backend) = cli.backend {
            config.backend = backend.into();
        }

        Ok(Self {
            paths,
            config,
            colors: use_colors(cli.color),
        })
    }

    /// Open the configured slot, creating the storage directories first.
    pub async fn open_persistence(&self) -> Result<SessionPersistence> {
        self.paths.ensure_dirs().await.with_context(|| {
            format!(
                "Failed to create storage directory {}",
                self.paths.session_dir.display()
            )
        })?;

        let options = SlotOptions {
            session_dir: self.paths.session_dir.clone(),
            keyring_service: self.config.keyring_service.clone(),
        };
        let slot = open_slot(self.config.backend, &options)
            .with_context(|| format!("Failed to open the {} backend", self.config.backend))?;
        debug!(backend = %self.config.backend, key = %self.config.slot_key, "Opened session slot");

        Ok(SessionPersistence::new(slot, self.config.slot_key.clone()))
    }
}

/// Dispatch the parsed command.
pub async fn dispatch_command(cli: Cli, ctx: AppContext) -> Result<()> {
    match cli.command {
        None | Some(Commands::Shell) => run_shell(&ctx).await,
        Some(Commands::Status) => run_status(&ctx).await,
        Some(Commands::Forget) => run_forget(&ctx).await,
    }
}

async fn run_shell(ctx: &AppContext) -> Result<()> {
    let persistence = ctx.open_persistence().await?;
    let controller = AuthController::new(persistence);
    let input = BufReader::new(tokio::io::stdin());

    let mut shell = Shell::new(controller, input, std::io::stdout(), ctx.colors);
    shell.run().await.context("Shell I/O failed")?;
    info!("Shell exited");
    Ok(())
}

async fn run_status(ctx: &AppContext) -> Result<()> {
    let persistence = ctx.open_persistence().await?;
    match persistence.try_load().await {
        Ok(Some(account)) => println_styled(
            MessageType::Success,
            &format!("Signed in as {} <{}>", account.name, account.email),
            ctx.colors,
        ),
        Ok(None) => println_styled(MessageType::Info, "Not signed in.", ctx.colors),
        Err(e) => println_styled(
            MessageType::Warning,
            &format!("Saved session is unreadable and will be ignored: {e}"),
            ctx.colors,
        ),
    }
    Ok(())
}

async fn run_forget(ctx: &AppContext) -> Result<()> {
    let persistence = ctx.open_persistence().await?;
    let removed = persistence
        .clear()
        .await
        .context("Failed to remove the saved session")?;

    if removed {
        println_styled(MessageType::Success, "Saved session removed.", ctx.colors);
    } else {
        println_styled(MessageType::Info, "No saved session.", ctx.colors);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use latch_session_store::{Account, SlotBackend};

    async fn context_in(dir: &std::path::Path, extra: &[&str]) -> AppContext {
        let home = dir.to_str().unwrap();
        let mut args = vec!["latch", "--home", home, "--color", "never"];
        args.extend_from_slice(extra);
        AppContext::resolve(&Cli::try_parse_from(args).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_backend_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "backend = \"keyring\"\n").unwrap();

        let ctx = context_in(dir.path(), &[]).await;
        assert_eq!(ctx.config.backend, SlotBackend::Keyring);

        let ctx = context_in(dir.path(), &["--backend", "file"]).await;
        assert_eq!(ctx.config.backend, SlotBackend::File);
        assert!(!ctx.colors);
    }

    #[tokio::test]
    async fn test_file_backend_uses_home_and_slot_key() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "slot_key = \"work\"\n").unwrap();
        let ctx = context_in(dir.path(), &["--backend", "file"]).await;

        let persistence = ctx.open_persistence().await.unwrap();
        assert_eq!(persistence.key(), "work");
        persistence
            .save(&Account::new("Ada", "ada@example.com", "hunter22"))
            .await
            .unwrap();
        assert!(dir.path().join("session").join("work.json").exists());

        run_forget(&ctx).await.unwrap();
        assert!(!dir.path().join("session").join("work.json").exists());
    }

    #[tokio::test]
    async fn test_status_tolerates_corrupt_session() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path(), &["--backend", "file"]).await;
        ctx.paths.ensure_dirs().await.unwrap();
        std::fs::write(dir.path().join("session").join("AAAA.json"), "{not json").unwrap();

        run_status(&ctx).await.unwrap();
    }
}
