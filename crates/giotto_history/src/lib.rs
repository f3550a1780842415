//! Durable post history for duplicate prevention and audit.
//!
//! The store is a single JSON file loaded fully into memory on open. Every
//! mutation rewrites the file through a temp-file-then-rename step, so a
//! crash mid-write never loses already-confirmed history and an external
//! reader never observes a partial write.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod history;

pub use history::{Order, PostHistory};
