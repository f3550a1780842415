//! Content and media provider error types.

/// Kinds of provider errors.
///
/// Covers both text generation and image generation backends. Callers treat
/// any of these as a degraded provider and substitute a local fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProviderErrorKind {
    /// HTTP transport failure before a response was received.
    #[display("HTTP request failed: {}", _0)]
    Http(String),

    /// The API returned a non-success status.
    #[display("API error (status {}): {}", status, message)]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The response body could not be parsed.
    #[display("Failed to parse response: {}", _0)]
    Parse(String),

    /// The call exceeded its time budget.
    #[display("Provider call timed out after {}s", _0)]
    Timeout(u64),

    /// The provider answered with empty or whitespace-only content.
    #[display("Provider returned empty content")]
    EmptyResponse,

    /// A generated artifact could not be stored locally.
    #[display("Local I/O failed: {}", _0)]
    Io(String),
}

/// Provider error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at {}:{}", kind, file, line)]
pub struct ProviderError {
    /// The kind of error that occurred.
    pub kind: ProviderErrorKind,
    /// Line number where the error was created.
    pub line: u32,
    /// File where the error was created.
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new provider error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
