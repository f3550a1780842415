//! Core data types for the giotto posting bot.
//!
//! This crate provides the foundation data types shared by the scheduler,
//! the history store, and the provider implementations.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod content;
mod fallback;
mod record;
mod schedule;

pub use content::{ContentStyle, MediaArtifact, MediaType, PostContent};
pub use fallback::FallbackPool;
pub use record::{PostOutcome, PostRecord, RemotePostId, SlotLabel};
pub use schedule::{Schedule, ScheduleSlot};
