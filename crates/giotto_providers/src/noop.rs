//! No-op publisher for runs that must not touch any platform.

use async_trait::async_trait;
use giotto_core::{PostContent, RemotePostId};
use giotto_error::PublishError;
use giotto_interface::Publisher;
use tracing::debug;

/// Publisher that does nothing.
///
/// Wired when auto-posting is disabled, so generation cycles still run end
/// to end and show up in history with a synthetic post id.
#[derive(Debug, Clone, Default)]
pub struct NoOpPublisher;

impl NoOpPublisher {
    /// Create a new no-op publisher.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Publisher for NoOpPublisher {
    async fn publish(&self, content: &PostContent) -> Result<RemotePostId, PublishError> {
        debug!(
            text_len = content.text().len(),
            has_media = content.media().is_some(),
            "NoOpPublisher: publish() called (no action taken)"
        );
        Ok(RemotePostId::from("noop"))
    }

    async fn verify_connection(&self) -> Result<(), PublishError> {
        debug!("NoOpPublisher: verify_connection() called (always succeeds)");
        Ok(())
    }

    fn platform_name(&self) -> &'static str {
        "noop"
    }
}
