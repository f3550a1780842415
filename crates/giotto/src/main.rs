//! Giotto CLI binary.
//!
//! This binary provides command-line access to the bot's three run modes:
//! - Generate and publish posts immediately
//! - Run the schedule polling loop
//! - Print recent post history

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands};

    // Load .env secrets before anything reads the environment
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let config = giotto::BotConfig::load(&cli.config)?;
    for warning in config.validate() {
        tracing::warn!("{}", warning);
    }

    let dry_run = cli.dry_run || *config.bot().dry_run();

    // Execute the requested command
    match cli.command {
        Commands::Immediate { count } => {
            cli::run_immediate(&config, count, dry_run).await?;
        }

        Commands::Schedule => {
            cli::run_schedule(&config, dry_run).await?;
        }

        Commands::History { days } => {
            cli::show_history(&config, days).await?;
        }
    }

    Ok(())
}
