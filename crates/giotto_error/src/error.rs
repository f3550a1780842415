//! Top-level error wrapper types.

use crate::{ConfigError, ProviderError, PublishError, SchedulerError, StorageError};

/// The foundation error enum collecting every error domain in the workspace.
///
/// # Examples
///
/// ```
/// use giotto_error::{GiottoError, ProviderError, ProviderErrorKind};
///
/// let provider_err = ProviderError::new(ProviderErrorKind::EmptyResponse);
/// let err: GiottoError = provider_err.into();
/// assert!(format!("{}", err).contains("empty"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum GiottoErrorKind {
    /// Content or media provider error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Publisher error
    #[from(PublishError)]
    Publish(PublishError),
    /// History storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Scheduler error
    #[from(SchedulerError)]
    Scheduler(SchedulerError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Giotto error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Giotto Error: {}", _0)]
pub struct GiottoError(Box<GiottoErrorKind>);

impl GiottoError {
    /// Create a new error from a kind.
    pub fn new(kind: GiottoErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GiottoErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to GiottoErrorKind
impl<T> From<T> for GiottoError
where
    T: Into<GiottoErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for giotto operations.
///
/// # Examples
///
/// ```
/// use giotto_error::{GiottoResult, PublishError, PublishErrorKind};
///
/// fn publish() -> GiottoResult<String> {
///     Err(PublishError::new(PublishErrorKind::Network(
///         "connection reset".to_string(),
///     )))?
/// }
/// ```
pub type GiottoResult<T> = std::result::Result<T, GiottoError>;
