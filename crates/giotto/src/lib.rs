//! Giotto - scheduled content-generation-and-posting bot
//!
//! Giotto periodically asks an LLM for a short post (a quote or a
//! micro-story), optionally generates an illustration for it, and publishes
//! the pair to a social platform. A local JSON history file guarantees each
//! configured daily slot posts at most once, across restarts.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use giotto::{BotConfig, build_scheduler};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BotConfig::load("giotto.toml")?;
//!     let mut scheduler = build_scheduler(&config, true).await?;
//!
//!     for record in scheduler.run_immediate(1).await? {
//!         println!("{}: {}", record.outcome(), record.content_excerpt());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Giotto is organized as a workspace with focused crates:
//!
//! - `giotto_core` - Core data types (PostRecord, Schedule, etc.)
//! - `giotto_interface` - ContentProvider/MediaProvider/Publisher traits
//! - `giotto_error` - Error types
//! - `giotto_history` - JSON-file history store with atomic writes
//! - `giotto_scheduler` - Cycle scheduler and polling loop
//! - `giotto_providers` - OpenAI, Gemini, Twitter, and local fallbacks
//!
//! This crate (`giotto`) re-exports everything and carries the CLI binary.

#![forbid(unsafe_code)]

mod config;
mod wiring;

pub use config::{
    BotConfig, BotSettings, ImageProviderKind, ProviderSettings, ScheduleSettings,
    TWITTER_BEARER_TOKEN_VAR, TextProviderKind,
};
pub use wiring::{GEMINI_API_KEY_VAR, OPENAI_API_KEY_VAR, build_scheduler};

// Re-export the workspace crates for convenience.
pub use giotto_core::*;
pub use giotto_error::*;
pub use giotto_history::*;
pub use giotto_interface::*;
pub use giotto_providers::*;
pub use giotto_scheduler::*;
