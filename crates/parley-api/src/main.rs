//! Parley CLI entry point.
//!
//! Binary name: `parley`
//!
//! Parses CLI arguments, sets up tracing, resolves config and storage, then
//! dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,parley_core=debug,parley_infra=debug",
        _ => "trace",
    };
    parley_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "parley", &mut std::io::stdout());
        return Ok(());
    }

    let result = run(cli).await;

    parley_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let state = AppState::init(cli.api_url.clone(), cli.ephemeral).await?;

    match cli.command {
        Commands::Chat { new } => cli::chat::loop_runner::run_chat_loop(&state, new).await,
        Commands::Recent { limit } => cli::recent::list_recent(&state, limit, cli.json).await,
        Commands::Show { chat_id } => {
            cli::show::show_chat(&state, chat_id.as_deref(), cli.json).await
        }
        Commands::Completions { .. } => unreachable!("handled in main"),
    }
}
