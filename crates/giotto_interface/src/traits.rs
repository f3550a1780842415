//! Trait definitions for content generation, media generation, and publishing.

use async_trait::async_trait;
use giotto_core::{MediaArtifact, PostContent, RemotePostId};
use giotto_error::{ProviderError, PublishError};

/// Backend that produces the text of a post.
///
/// The only contract is a bounded response time and either well-formed
/// non-empty text or an explicit failure; the caller substitutes a local
/// fallback on any error.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Generate post text for a topic hint.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The API request fails or returns a non-success status
    /// - The response cannot be parsed
    /// - The response is empty or whitespace-only
    async fn generate(&self, topic_hint: &str) -> Result<String, ProviderError>;

    /// Provider name (e.g. "openai", "gemini").
    fn provider_name(&self) -> &'static str;
}

/// Backend that produces an illustration for generated text.
#[async_trait]
pub trait MediaProvider: Send + Sync {
    /// Create an image for the given text.
    ///
    /// `output_hint` is a filename stem the provider should use when storing
    /// the artifact.
    ///
    /// # Errors
    ///
    /// Returns error if generation or local storage fails.
    async fn create_image(
        &self,
        text: &str,
        output_hint: &str,
    ) -> Result<MediaArtifact, ProviderError>;

    /// Provider name (e.g. "openai", "placeholder").
    fn provider_name(&self) -> &'static str;
}

/// Backend that publishes finished content to a social platform.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish content, returning the platform's post identifier.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Authentication fails
    /// - The platform rate limit is exceeded
    /// - The network request fails
    /// - The platform rejects the post
    ///
    /// Failures are classified so callers can log them distinctly; see
    /// [`PublishError`].
    async fn publish(&self, content: &PostContent) -> Result<RemotePostId, PublishError>;

    /// Verify credentials without posting anything.
    ///
    /// # Errors
    ///
    /// Returns error if the platform rejects the credentials or cannot be
    /// reached.
    async fn verify_connection(&self) -> Result<(), PublishError>;

    /// Platform name (e.g. "twitter", "noop").
    fn platform_name(&self) -> &'static str;
}
