//! Provider wiring: turn a [`BotConfig`] into a ready scheduler.

use crate::config::{BotConfig, ImageProviderKind, TWITTER_BEARER_TOKEN_VAR, TextProviderKind};
use giotto_error::{ConfigError, ConfigErrorKind, GiottoResult};
use giotto_history::PostHistory;
use giotto_interface::{ContentProvider, MediaProvider, Publisher};
use giotto_providers::{
    GeminiContentProvider, NoOpPublisher, OpenAiContentProvider, OpenAiImageProvider,
    PlaceholderCardProvider, TwitterPublisher,
};
use giotto_scheduler::Scheduler;
use std::sync::Arc;

/// Environment variable holding the OpenAI API key.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Build a scheduler from configuration and environment secrets.
///
/// `dry_run` forces the no-op publisher and DryRun outcomes regardless of the
/// `auto_post` setting. The placeholder card renderer is always installed as
/// the media fallback so a degraded image provider never blocks a cycle.
///
/// # Errors
///
/// Returns error if a required API key is missing from the environment, a
/// configured post time is invalid, or the history file cannot be opened.
pub async fn build_scheduler(config: &BotConfig, dry_run: bool) -> GiottoResult<Scheduler> {
    let prompt = config.prompt().clone();

    let content: Arc<dyn ContentProvider> = match config.providers().text() {
        TextProviderKind::Openai => Arc::new(OpenAiContentProvider::new(
            require_env(OPENAI_API_KEY_VAR)?,
            config.providers().text_model().as_str(),
            prompt.clone(),
        )),
        TextProviderKind::Gemini => Arc::new(GeminiContentProvider::new(
            require_env(GEMINI_API_KEY_VAR)?,
            config.providers().text_model().as_str(),
            prompt.clone(),
        )),
    };

    let media: Arc<dyn MediaProvider> = match config.providers().image() {
        ImageProviderKind::Openai => Arc::new(OpenAiImageProvider::new(
            require_env(OPENAI_API_KEY_VAR)?,
            config.providers().image_model().as_str(),
            config.providers().image_output_dir(),
            prompt,
        )),
        ImageProviderKind::Placeholder => Arc::new(PlaceholderCardProvider::new(
            config.providers().image_output_dir(),
        )),
    };

    let publisher: Arc<dyn Publisher> = if *config.bot().auto_post() && !dry_run {
        Arc::new(TwitterPublisher::new(require_env(TWITTER_BEARER_TOKEN_VAR)?))
    } else {
        Arc::new(NoOpPublisher::new())
    };

    if let Err(e) = publisher.verify_connection().await {
        tracing::warn!(
            platform = publisher.platform_name(),
            error = %e,
            "Publisher connection check failed, cycles will record failures"
        );
    }

    let history = PostHistory::open(config.schedule().history_file()).await?;
    let scheduler_config = config.scheduler_config(dry_run)?;

    Ok(Scheduler::new(content, media, publisher, history, scheduler_config)
        .with_media_fallback(Arc::new(PlaceholderCardProvider::new(
            config.providers().image_output_dir(),
        ))))
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name)
        .map_err(|_| ConfigError::new(ConfigErrorKind::MissingKey(name.to_string())))
}
