//! Configuration error types.

use std::path::PathBuf;

/// Kinds of configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// The configuration file could not be read.
    #[display("File I/O error: {} ({})", path.display(), message)]
    FileIo {
        /// Path that caused the error.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// The configuration file could not be parsed.
    #[display("TOML parsing error: {}", _0)]
    TomlParse(String),

    /// A required secret was not present in the environment.
    #[display("Missing environment variable: {}", _0)]
    MissingKey(String),

    /// A configuration value was rejected by validation.
    #[display("Invalid configuration: {}", _0)]
    Invalid(String),
}

/// Configuration error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Config Error: {} at {}:{}", kind, file, line)]
pub struct ConfigError {
    /// The kind of error that occurred.
    pub kind: ConfigErrorKind,
    /// Line number where the error was created.
    pub line: u32,
    /// File where the error was created.
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new configuration error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    #[track_caller]
    fn from(e: toml::de::Error) -> Self {
        Self::new(ConfigErrorKind::TomlParse(e.to_string()))
    }
}
