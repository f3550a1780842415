//! Bot configuration loading.

use derive_getters::Getters;
use giotto_core::{FallbackPool, Schedule};
use giotto_error::{ConfigError, ConfigErrorKind};
use giotto_providers::PromptSettings;
use giotto_scheduler::{DedupMode, SchedulerConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use typed_builder::TypedBuilder;

/// Environment variable holding the Twitter/X bearer token.
pub const TWITTER_BEARER_TOKEN_VAR: &str = "TWITTER_BEARER_TOKEN";

/// Which backend generates post text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextProviderKind {
    /// OpenAI chat completions.
    #[default]
    Openai,
    /// Gemini generateContent.
    Gemini,
}

/// Which backend generates post images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageProviderKind {
    /// OpenAI images API.
    #[default]
    Openai,
    /// Local SVG text cards; no network.
    Placeholder,
}

/// General bot behavior.
#[derive(Debug, Clone, Deserialize, Getters, TypedBuilder)]
pub struct BotSettings {
    /// Publish for real; when false, cycles go through the no-op publisher.
    #[builder(default = false)]
    #[serde(default)]
    auto_post: bool,

    /// Skip the publish step entirely and record DryRun outcomes.
    #[builder(default = false)]
    #[serde(default)]
    dry_run: bool,

    /// Topic hint handed to the content provider; defaults to the prompt
    /// theme.
    #[builder(default)]
    #[serde(default)]
    topic_hint: Option<String>,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Provider selection and models.
#[derive(Debug, Clone, Deserialize, Getters, TypedBuilder)]
pub struct ProviderSettings {
    /// Text generation backend.
    #[builder(default)]
    #[serde(default)]
    text: TextProviderKind,

    /// Text model identifier.
    #[builder(default = default_text_model())]
    #[serde(default = "default_text_model")]
    text_model: String,

    /// Image generation backend.
    #[builder(default)]
    #[serde(default)]
    image: ImageProviderKind,

    /// Image model identifier.
    #[builder(default = default_image_model())]
    #[serde(default = "default_image_model")]
    image_model: String,

    /// Directory where generated media is stored.
    #[builder(default = default_image_output_dir())]
    #[serde(default = "default_image_output_dir")]
    image_output_dir: PathBuf,
}

fn default_text_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_image_output_dir() -> PathBuf {
    PathBuf::from("generated_images")
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Scheduling and history settings.
#[derive(Debug, Clone, Deserialize, Getters, TypedBuilder)]
pub struct ScheduleSettings {
    /// Daily posting times, `"HH:MM"` in UTC.
    #[builder(default = Schedule::default_times())]
    #[serde(default = "Schedule::default_times")]
    post_times: Vec<String>,

    /// Seconds between schedule polls.
    #[builder(default = 60)]
    #[serde(default = "default_poll_interval")]
    poll_interval_seconds: u64,

    /// Time budget in seconds for each provider call.
    #[builder(default = 60)]
    #[serde(default = "default_provider_timeout")]
    provider_timeout_seconds: u64,

    /// Days of history to keep.
    #[builder(default = 30)]
    #[serde(default = "default_retention_days")]
    retention_days: u32,

    /// Duplicate-prevention granularity.
    #[builder(default)]
    #[serde(default)]
    dedup: DedupMode,

    /// Path of the history file.
    #[builder(default = default_history_file())]
    #[serde(default = "default_history_file")]
    history_file: PathBuf,
}

fn default_poll_interval() -> u64 {
    60
}

fn default_provider_timeout() -> u64 {
    60
}

fn default_retention_days() -> u32 {
    30
}

fn default_history_file() -> PathBuf {
    PathBuf::from("post_history.json")
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Full bot configuration, loaded from a TOML file.
#[derive(Debug, Clone, Default, Deserialize, Getters)]
pub struct BotConfig {
    /// General behavior.
    #[serde(default)]
    bot: BotSettings,

    /// Provider selection.
    #[serde(default)]
    providers: ProviderSettings,

    /// Prompt settings.
    #[serde(default)]
    prompt: PromptSettings,

    /// Schedule and history settings.
    #[serde(default)]
    schedule: ScheduleSettings,
}

impl BotConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!("Loading bot config from file");

        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(ConfigErrorKind::FileIo {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        })?;

        let config: Self = toml::from_str(&contents)?;
        tracing::info!(
            post_times = config.schedule.post_times.len(),
            auto_post = config.bot.auto_post,
            "Loaded bot configuration"
        );
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            tracing::info!(
                path = %path.as_ref().display(),
                "No configuration file found, using defaults"
            );
            Ok(Self::default())
        }
    }

    /// Validate configuration.
    ///
    /// # Returns
    ///
    /// List of validation warnings (empty if valid).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.schedule.post_times.is_empty() {
            warnings.push("no post times configured, the schedule loop will never fire".to_string());
        }

        if self.bot.auto_post && self.bot.dry_run {
            warnings.push("dry_run is set, auto_post will be ignored".to_string());
        }

        if self.bot.auto_post && std::env::var(TWITTER_BEARER_TOKEN_VAR).is_err() {
            warnings.push(format!(
                "auto_post is set but {} is not in the environment",
                TWITTER_BEARER_TOKEN_VAR
            ));
        }

        if self.schedule.retention_days == 0 {
            warnings.push("retention_days is 0, history is pruned immediately".to_string());
        }

        warnings
    }

    /// Build the scheduler settings from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if any configured post time is invalid.
    pub fn scheduler_config(&self, dry_run: bool) -> Result<SchedulerConfig, ConfigError> {
        let schedule = Schedule::from_times(&self.schedule.post_times)?;
        let topic_hint = self
            .bot
            .topic_hint
            .clone()
            .unwrap_or_else(|| self.prompt.theme().clone());

        Ok(SchedulerConfig::builder()
            .schedule(schedule)
            .poll_interval(Duration::from_secs(self.schedule.poll_interval_seconds))
            .provider_timeout(Duration::from_secs(self.schedule.provider_timeout_seconds))
            .dry_run(dry_run)
            .retention_days(self.schedule.retention_days)
            .dedup(*self.schedule.dedup())
            .topic_hint(topic_hint)
            .fallback(FallbackPool::for_style(*self.prompt.style()))
            .build())
    }
}
