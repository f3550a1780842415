//! The cycle scheduler: decides when to post and records every outcome.
//!
//! A single logical worker drives generation-and-publish cycles either
//! immediately or from a polling loop over configured daily slots. The
//! history store is consulted before a slot fires and updated after every
//! cycle, so restarts and overlapping poll ticks never produce duplicate or
//! missing posts.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod scheduler;

pub use config::{DedupMode, SchedulerConfig};
pub use scheduler::Scheduler;
