//! History storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create the directory holding the history file.
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),

    /// Failed to write the history file.
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),

    /// Failed to read the history file.
    #[display("Failed to read file: {}", _0)]
    FileRead(String),

    /// The history file exists but could not be parsed.
    #[display("Failed to parse history file: {}", _0)]
    Parse(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use giotto_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::FileRead("denied".to_string()));
/// assert!(format!("{}", err).contains("read"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at {}:{}", kind, file, line)]
pub struct StorageError {
    /// The kind of error that occurred.
    pub kind: StorageErrorKind,
    /// Line number where the error was created.
    pub line: u32,
    /// File where the error was created.
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    #[track_caller]
    fn from(e: serde_json::Error) -> Self {
        Self::new(StorageErrorKind::Parse(e.to_string()))
    }
}
