//! pulse - Market Pulse dashboard CLI
//!
//! Sequences market-insight fetches for a global briefing and each sales
//! region, and renders their status in the terminal.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (stderr keeps --json output clean)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::from_default_env()
                .add_directive("pulse=info".parse()?)
                .add_directive("pulse_core=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = config::Config::load()?;

    // Execute command
    match cli.command {
        Commands::Refresh { json } => commands::refresh::all(json, &config).await?,
        Commands::Briefing { json } => commands::refresh::briefing(json, &config).await?,
        Commands::Region { code, json } => {
            commands::refresh::region(&code, json, &config).await?
        }
        Commands::Regions => commands::regions::execute(&config)?,
        Commands::Watch { interval } => commands::watch::execute(interval, &config).await?,
        Commands::Version => println!("pulse {}", env!("CARGO_PKG_VERSION")),
    }

    Ok(())
}
