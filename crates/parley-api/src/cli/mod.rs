//! CLI command definitions for the `parley` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod recent;
pub mod show;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with a reply service from your terminal.
#[derive(Parser)]
#[command(name = "parley", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Base URL of the reply service (overrides config.toml).
    #[arg(long, global = true, env = "PARLEY_API_URL")]
    pub api_url: Option<String>,

    /// Keep chats in memory only; nothing is read from or written to disk.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true, hide = true, env = "PARLEY_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive chat.
    Chat {
        /// Open a fresh chat instead of resuming.
        #[arg(long)]
        new: bool,
    },

    /// List recent chats.
    #[command(alias = "ls")]
    Recent {
        /// Number of chats to list (defaults to `recent_limit` from config).
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Print a chat transcript.
    Show {
        /// Chat ID to print; defaults to the active chat.
        chat_id: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
