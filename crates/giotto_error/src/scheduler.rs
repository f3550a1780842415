//! Scheduler error types.

use crate::StorageError;

/// Kinds of scheduler errors.
#[derive(Debug, Clone, derive_more::Display)]
pub enum SchedulerErrorKind {
    /// A public operation received a malformed argument.
    #[display("Invalid argument: {}", _0)]
    InvalidArgument(String),

    /// The history store could not persist a record.
    ///
    /// Never swallowed: losing history silently would break duplicate
    /// prevention.
    #[display("{}", _0)]
    Storage(StorageError),
}

/// Scheduler error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Scheduler Error: {} at {}:{}", kind, file, line)]
pub struct SchedulerError {
    /// The kind of error that occurred.
    pub kind: SchedulerErrorKind,
    /// Line number where the error was created.
    pub line: u32,
    /// File where the error was created.
    pub file: &'static str,
}

impl SchedulerError {
    /// Create a new scheduler error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SchedulerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Check if the error was an invalid argument rejection.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.kind, SchedulerErrorKind::InvalidArgument(_))
    }
}

impl From<StorageError> for SchedulerError {
    #[track_caller]
    fn from(e: StorageError) -> Self {
        Self::new(SchedulerErrorKind::Storage(e))
    }
}
