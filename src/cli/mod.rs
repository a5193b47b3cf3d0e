//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod ask;
pub mod config;
pub mod locate;
pub mod serve;
pub mod status;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Ask an AI place-recommendation backend where to go
#[derive(Parser)]
#[command(name = "placefinder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search for places from the terminal
    Ask(ask::AskArgs),

    /// Start the web UI (foreground)
    Serve(serve::ServeArgs),

    /// Show the location searches will use
    Locate(locate::LocateArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Check the backend and show configuration status
    Status(status::StatusArgs),
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins; otherwise `default_level` applies.
pub fn init_logging(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .try_init();
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ask(args) => ask::run(args).await,
        Commands::Serve(args) => serve::run(args).await,
        Commands::Locate(args) => locate::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Status(args) => status::run(args).await,
    }
}
