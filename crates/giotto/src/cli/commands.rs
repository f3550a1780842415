//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Giotto - scheduled content-generation-and-posting bot
#[derive(Parser, Debug)]
#[command(name = "giotto")]
#[command(about = "Generate short posts with an LLM and publish them on a daily schedule", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the bot configuration file
    #[arg(long, global = true, default_value = "giotto.toml")]
    pub config: PathBuf,

    /// Skip the publish step; cycles are recorded as dry runs
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate and publish posts right now, ignoring the schedule
    Immediate {
        /// Number of cycles to run
        #[arg(long, default_value = "1")]
        count: u32,
    },

    /// Run the polling loop until interrupted
    Schedule,

    /// Print post history
    History {
        /// Number of days of history to show
        #[arg(long, default_value = "7")]
        days: i64,
    },
}
