//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;

use crate::config::{Config, Settings};
use crate::logging;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.debug);

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, &config)?;

    // Dispatch to appropriate command
    match cli.command.unwrap_or(Commands::Enroll) {
        Commands::Enroll => commands::enroll::execute(&settings).await,
        Commands::CaInfo => commands::ca_info::execute(&settings).await,
        Commands::List => commands::list::execute(&settings).await,
    }
}
