//! Publisher error types.

/// Kinds of publish failures.
///
/// Publishers must distinguish these classes so callers can log and display
/// them differently, even though the scheduler records them all uniformly as
/// a failed cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PublishErrorKind {
    /// Credentials were rejected by the platform.
    #[display("Authentication failed: {}", _0)]
    Authentication(String),

    /// The platform rate limit was hit.
    #[display("Rate limit exceeded: retry after {}s", retry_after_seconds.unwrap_or(0))]
    RateLimited {
        /// Seconds to wait before retrying, when the platform reported one.
        retry_after_seconds: Option<u64>,
    },

    /// Transient transport failure (connect, DNS, timeout).
    #[display("Network failure: {}", _0)]
    Network(String),

    /// Media upload failed; the post itself was not attempted with media.
    #[display("Media upload failed: {}", _0)]
    MediaUpload(String),

    /// Any other non-success response from the platform.
    #[display("Platform error (status {}): {}", status, message)]
    Api {
        /// HTTP status code returned by the platform.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },
}

/// Publish error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Publish Error: {} at {}:{}", kind, file, line)]
pub struct PublishError {
    /// The kind of error that occurred.
    pub kind: PublishErrorKind,
    /// Line number where the error was created.
    pub line: u32,
    /// File where the error was created.
    pub file: &'static str,
}

impl PublishError {
    /// Create a new publish error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PublishErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Check if the failure was an authentication rejection.
    pub fn is_authentication(&self) -> bool {
        matches!(self.kind, PublishErrorKind::Authentication(_))
    }

    /// Check if the failure was a rate limit.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.kind, PublishErrorKind::RateLimited { .. })
    }

    /// Check if the failure was a transport-level network error.
    pub fn is_network(&self) -> bool {
        matches!(self.kind, PublishErrorKind::Network(_))
    }
}
