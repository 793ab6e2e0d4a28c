//! watchlist: browse the screener's auto-watchlist from the terminal.
//!
//! Usage:
//!   watchlist list                               # ranked by score
//!   watchlist list --no-risk --hide-tier T3      # narrow the list
//!   watchlist list --tag "Squeeze Watch" --json  # machine-readable
//!   watchlist watch                              # interactive session

mod cli;
mod list;
mod render;
mod session;

use auto_watchlist::WatchlistSource;
use clap::Parser;
use screener_client::{HttpWatchlistSource, ScreenerClient};
use std::process::ExitCode;
use std::sync::Arc;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "watchlist=info,auto_watchlist=info,screener_client=warn".into()
            }),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.screener_config()?;
    let client = ScreenerClient::new(&config)?;
    tracing::debug!("Using screener endpoint {}", client.endpoint());
    let source: Arc<dyn WatchlistSource> = Arc::new(HttpWatchlistSource::new(client));

    match &cli.command {
        Command::List(args) => list::run(source, args).await,
        Command::Watch => {
            session::run(source).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
