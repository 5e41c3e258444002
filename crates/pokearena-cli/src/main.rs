//! Pokearena terminal client.
//!
//! Run with: `pokearena <command>`

mod commands;
mod render;

use std::time::Duration;

use anyhow::Result;
use clap::{ArgAction, Parser};
use commands::{Battle, PokemonCommand, Teams};
use pokearena_api::ApiConfig;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Pokearena battles from the terminal
#[derive(Parser)]
#[command(name = "pokearena")]
#[command(about = "Creature battles and catalog editing for Pokearena", long_about = None)]
#[command(version)]
struct Cli {
    /// API base URL (overrides POKEARENA_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request limit in seconds (overrides POKEARENA_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Log more (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// List the teams available for battle
    Teams(Teams),

    /// Fight a battle between two teams
    Battle(Battle),

    /// Browse and edit the creature catalog
    #[command(subcommand)]
    Pokemon(PokemonCommand),
}

impl Cli {
    fn api_config(&self) -> ApiConfig {
        let mut config = ApiConfig::from_env();
        if let Some(url) = &self.api_url {
            config.base_url.clone_from(url);
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout = Duration::from_secs(secs.max(1));
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = cli.api_config();
    tracing::debug!(base_url = %config.base_url, timeout = ?config.request_timeout, "api config");

    match cli.command {
        Command::Teams(cmd) => cmd.execute(&config).await,
        Command::Battle(cmd) => cmd.execute(&config).await,
        Command::Pokemon(cmd) => cmd.execute(&config).await,
    }
}

/// Logs go to stderr so they never mix with command output.
fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
