//! Latch CLI - main entry point.
//!
//! With no subcommand, starts the interactive shell. `status` and `forget`
//! inspect or remove the saved session without entering it.

use anyhow::Result;
use clap::Parser;

use latch_cli::cli::{AppContext, Cli, dispatch_command};
use latch_cli::logging;
use latch_cli::styled_output::print_error;

async fn run(cli: Cli) -> Result<()> {
    let logs = logging::init(&cli);
    let ctx = AppContext::resolve(&cli).await?;
    logs.apply_config(&ctx.config);
    dispatch_command(cli, ctx).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
