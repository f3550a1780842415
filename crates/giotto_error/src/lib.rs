//! Error types for the giotto bot.
//!
//! This crate provides the foundation error types used throughout the giotto
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use giotto_error::{GiottoResult, StorageError, StorageErrorKind};
//!
//! fn persist() -> GiottoResult<()> {
//!     Err(StorageError::new(StorageErrorKind::FileWrite(
//!         "disk full".to_string(),
//!     )))?
//! }
//!
//! match persist() {
//!     Ok(()) => println!("Saved"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod provider;
mod publish;
mod scheduler;
mod storage;

pub use config::{ConfigError, ConfigErrorKind};
pub use error::{GiottoError, GiottoErrorKind, GiottoResult};
pub use provider::{ProviderError, ProviderErrorKind};
pub use publish::{PublishError, PublishErrorKind};
pub use scheduler::{SchedulerError, SchedulerErrorKind};
pub use storage::{StorageError, StorageErrorKind};
