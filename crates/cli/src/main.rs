//! Lobby - headless front-end for the lobby chat core.
//!
//! Replays a recorded event feed through the synchronization core and
//! prints the resulting session, presence and conversations.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod commands;

/// Lobby - chat conversation synchronization
#[derive(Parser)]
#[command(name = "lobby")]
#[command(about = "Replay chat event feeds through the lobby sync core", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Join as a user and replay a JSON-lines file of inbound events
    Replay {
        /// Display name to join as
        #[arg(short, long)]
        name: String,

        /// Messages to send after the feed, as `target:body` (target `group` or a name)
        #[arg(short, long)]
        send: Vec<String>,

        /// File with one inbound event per line
        events: PathBuf,
    },

    /// Show configuration
    Config {
        /// Key to show
        key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Replay { name, send, events } => {
            commands::replay::execute(&name, &send, &events).await
        }
        Commands::Config { key } => commands::config::execute(key),
    }
}
