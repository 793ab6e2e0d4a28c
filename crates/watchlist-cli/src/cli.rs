//! Command-line arguments for the `watchlist` binary.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `list`  | Fetch once, apply filters from flags, print and exit |
//! | `watch` | Interactive session driven by commands on stdin |
//!
//! Connection settings fall back to `WATCHLIST_API_URL`, `WATCHLIST_API_PATH`
//! and `WATCHLIST_TIMEOUT_SECS` (a `.env` file is honoured).

use auto_watchlist::Tier;
use clap::{Args, Parser, Subcommand};
use screener_client::{parse_timeout, ScreenerConfig, ScreenerResult};
use std::time::Duration;

/// Browse the screener's auto-watchlist
#[derive(Debug, Parser)]
#[command(name = "watchlist", version, about = "Browse the screener's auto-watchlist")]
pub struct Cli {
    /// Base URL of the screener service
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Path of the watchlist endpoint
    #[arg(long, global = true)]
    pub path: Option<String>,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the filtered watchlist once
    List(ListArgs),
    /// Interactive session
    Watch,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Hide a tier (T1, T2, T3); repeatable
    #[arg(long = "hide-tier", value_name = "TIER", value_parser = parse_tier)]
    pub hide_tiers: Vec<Tier>,

    /// Hide risk-blocked stocks
    #[arg(long)]
    pub no_risk: bool,

    /// Only show stocks carrying one of these tags; repeatable
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Sort mode: score or symbol
    #[arg(long, default_value = "score")]
    pub sort: String,

    /// Expand a row; repeatable
    #[arg(long = "expand", value_name = "SYMBOL")]
    pub expand: Vec<String>,

    /// Print the display list as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Environment config with command-line overrides applied
    pub fn screener_config(&self) -> ScreenerResult<ScreenerConfig> {
        let env_timeout = std::env::var("WATCHLIST_TIMEOUT_SECS").ok();
        self.apply_overrides(ScreenerConfig::default(), env_timeout.as_deref())
    }

    /// `--timeout-secs` wins over the environment, so a bad env timeout only
    /// fails when no flag is given.
    fn apply_overrides(
        &self,
        mut config: ScreenerConfig,
        env_timeout: Option<&str>,
    ) -> ScreenerResult<ScreenerConfig> {
        if let Some(url) = &self.url {
            config.base_url = url.clone();
        }
        if let Some(path) = &self.path {
            config.path = path.clone();
        }
        config.timeout = match self.timeout_secs {
            Some(secs) => Some(Duration::from_secs(secs)),
            None => parse_timeout(env_timeout)?,
        };
        Ok(config)
    }
}

fn parse_tier(s: &str) -> Result<Tier, String> {
    Tier::parse(s).ok_or_else(|| format!("unknown tier '{}', expected T1, T2 or T3", s))
}
