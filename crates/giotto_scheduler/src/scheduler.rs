//! The generation-and-publish cycle driver.

use crate::{DedupMode, SchedulerConfig};
use chrono::{DateTime, NaiveDate, Utc};
use giotto_core::{MediaArtifact, PostContent, PostOutcome, PostRecord, SlotLabel};
use giotto_error::{GiottoResult, SchedulerError, SchedulerErrorKind};
use giotto_history::{Order, PostHistory};
use giotto_interface::{ContentProvider, MediaProvider, Publisher};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Drives generation-and-publish cycles against the configured providers.
///
/// Owns the history store and all provider handles explicitly; there is no
/// ambient state. Cycles are strictly sequential: provider calls within a
/// cycle depend on each other's output, and separate cycles run one after
/// another to respect publisher rate limits and keep history writes
/// race-free.
pub struct Scheduler {
    content: Arc<dyn ContentProvider>,
    media: Arc<dyn MediaProvider>,
    media_fallback: Option<Arc<dyn MediaProvider>>,
    publisher: Arc<dyn Publisher>,
    history: PostHistory,
    config: SchedulerConfig,
}

impl Scheduler {
    /// Create a scheduler from providers, a history store, and settings.
    pub fn new(
        content: Arc<dyn ContentProvider>,
        media: Arc<dyn MediaProvider>,
        publisher: Arc<dyn Publisher>,
        history: PostHistory,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            content,
            media,
            media_fallback: None,
            publisher,
            history,
            config,
        }
    }

    /// Install a local media provider used when the primary one degrades.
    pub fn with_media_fallback(mut self, fallback: Arc<dyn MediaProvider>) -> Self {
        self.media_fallback = Some(fallback);
        self
    }

    /// The scheduler's settings.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Read access to the underlying history store.
    pub fn history(&self) -> &PostHistory {
        &self.history
    }

    /// Run `count` independent cycles back-to-back, ignoring the schedule.
    ///
    /// Each cycle gets the `"manual"` slot label and its own record; one
    /// cycle's failure does not abort the rest.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `count` is zero. Cycle-level storage
    /// failures are logged and the affected cycle's record is absent from
    /// the returned list.
    #[tracing::instrument(skip(self))]
    pub async fn run_immediate(&mut self, count: u32) -> GiottoResult<Vec<PostRecord>> {
        if count == 0 {
            return Err(SchedulerError::new(SchedulerErrorKind::InvalidArgument(
                "count must be positive".to_string(),
            ))
            .into());
        }

        tracing::info!(count, "Starting immediate generation");

        let mut records = Vec::with_capacity(count as usize);
        for cycle in 1..=count {
            match self.run_cycle(SlotLabel::manual()).await {
                Ok(record) => {
                    tracing::info!(cycle, count, outcome = %record.outcome(), "Cycle finished");
                    records.push(record);
                }
                Err(e) => {
                    tracing::error!(cycle, count, error = %e, "Cycle failed to record its outcome");
                }
            }
        }

        Ok(records)
    }

    /// Run the polling loop until the cancellation token fires.
    ///
    /// Each tick evaluates every configured slot; a slot that is due and not
    /// yet satisfied today fires exactly one cycle, and the cycle's outcome
    /// is recorded before the next slot is considered. Cancellation takes
    /// effect between polls: a cycle already in flight runs to completion,
    /// including recording its outcome. No error terminates the loop.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn run_schedule_loop(&mut self, cancel: CancellationToken) -> GiottoResult<()> {
        tracing::info!(
            slots = self.config.schedule().len(),
            poll_interval = ?self.config.poll_interval(),
            dry_run = self.config.dry_run(),
            "Schedule loop started"
        );

        let mut ticker = tokio::time::interval(*self.config.poll_interval());
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Cancellation requested, schedule loop stopping");
                    return Ok(());
                }
                _ = ticker.tick() => {
                    self.run_due_slots(Utc::now()).await;
                }
            }
        }
    }

    /// Evaluate all slots at the given instant and fire the unsatisfied due
    /// ones.
    ///
    /// This is one poll of the schedule loop; errors are logged, never
    /// propagated, so the loop survives every cycle failure.
    pub async fn run_due_slots(&mut self, now: DateTime<Utc>) -> Vec<PostRecord> {
        let today = now.date_naive();
        let slots = self.config.schedule().slots().to_vec();
        let mut fired = Vec::new();

        for slot in slots {
            if !slot.is_due(now) {
                continue;
            }
            if self.slot_satisfied(slot.label(), today) {
                tracing::debug!(slot = %slot.label(), "Slot already satisfied today");
                continue;
            }

            tracing::info!(slot = %slot.label(), "Slot due, starting cycle");
            match self.run_cycle(slot.label().clone()).await {
                Ok(record) => fired.push(record),
                Err(e) => {
                    tracing::error!(slot = %slot.label(), error = %e, "Cycle failed to record its outcome");
                }
            }
        }

        fired
    }

    /// Records from the last `days` days, ascending by timestamp.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for non-positive `days`; no side effects.
    pub fn get_history(&self, days: i64) -> GiottoResult<Vec<PostRecord>> {
        if days <= 0 {
            return Err(SchedulerError::new(SchedulerErrorKind::InvalidArgument(
                format!("days must be positive, got {}", days),
            ))
            .into());
        }

        Ok(self.history.records_within(days, Order::Ascending))
    }

    /// Run one full generation-and-publish cycle.
    ///
    /// Always produces exactly one [`PostRecord`]: provider failures degrade
    /// to fallbacks and publish failures are captured in the record rather
    /// than propagated. Only a history write failure makes the cycle itself
    /// fail.
    ///
    /// # Errors
    ///
    /// Returns error if the record cannot be persisted.
    #[tracing::instrument(skip(self), fields(slot = %slot_label))]
    pub async fn run_cycle(&mut self, slot_label: SlotLabel) -> Result<PostRecord, SchedulerError> {
        let text = self.generate_text().await;
        let output_hint = format!("post_{}", Utc::now().format("%Y%m%d_%H%M%S"));
        let content = match self.generate_media(&text, &output_hint).await {
            Some(media) => PostContent::with_media(text, media),
            None => PostContent::new(text),
        };

        let record = if *self.config.dry_run() {
            tracing::info!("Dry run: skipping publish step");
            PostRecord::builder()
                .timestamp(Utc::now())
                .slot_label(slot_label)
                .content_excerpt(PostRecord::excerpt_of(content.text()))
                .outcome(PostOutcome::DryRun)
                .build()
        } else {
            self.publish(content, slot_label).await
        };

        self.history.append(record.clone()).await?;

        // The record is already durable; a failed prune must not claim
        // otherwise.
        if let Err(e) = self.history.prune(*self.config.retention_days()).await {
            tracing::warn!(error = %e, "History prune failed");
        }

        Ok(record)
    }

    fn slot_satisfied(&self, label: &SlotLabel, today: NaiveDate) -> bool {
        match self.config.dedup() {
            DedupMode::PerSlot => self.history.is_slot_satisfied(label, today),
            DedupMode::PerDay => self.history.is_day_satisfied(today),
        }
    }

    /// Request text from the content provider, degrading to the fallback
    /// pool on failure, timeout, or empty output.
    async fn generate_text(&self) -> String {
        let timeout = *self.config.provider_timeout();
        let call = self.content.generate(self.config.topic_hint());

        match tokio::time::timeout(timeout, call).await {
            Ok(Ok(text)) if !text.trim().is_empty() => text,
            Ok(Ok(_)) => {
                tracing::warn!(
                    provider = self.content.provider_name(),
                    "Content provider returned empty text, using fallback"
                );
                self.fallback_text()
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    provider = self.content.provider_name(),
                    error = %e,
                    "Content provider failed, using fallback"
                );
                self.fallback_text()
            }
            Err(_) => {
                tracing::warn!(
                    provider = self.content.provider_name(),
                    timeout_secs = timeout.as_secs(),
                    "Content provider timed out, using fallback"
                );
                self.fallback_text()
            }
        }
    }

    fn fallback_text(&self) -> String {
        self.config.fallback().select(self.history.len()).to_string()
    }

    /// Request media, trying the fallback provider when the primary
    /// degrades. Returns `None` when no media could be produced at all; the
    /// cycle still proceeds to the publish step.
    async fn generate_media(&self, text: &str, output_hint: &str) -> Option<MediaArtifact> {
        let timeout = *self.config.provider_timeout();

        match tokio::time::timeout(timeout, self.media.create_image(text, output_hint)).await {
            Ok(Ok(artifact)) => return Some(artifact),
            Ok(Err(e)) => {
                tracing::warn!(
                    provider = self.media.provider_name(),
                    error = %e,
                    "Media provider failed, trying fallback"
                );
            }
            Err(_) => {
                tracing::warn!(
                    provider = self.media.provider_name(),
                    timeout_secs = timeout.as_secs(),
                    "Media provider timed out, trying fallback"
                );
            }
        }

        let fallback = self.media_fallback.as_ref()?;
        match tokio::time::timeout(timeout, fallback.create_image(text, output_hint)).await {
            Ok(Ok(artifact)) => Some(artifact),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Fallback media provider failed, posting text-only");
                None
            }
            Err(_) => {
                tracing::warn!("Fallback media provider timed out, posting text-only");
                None
            }
        }
    }

    /// Attempt the publish step and finalize the record for it.
    async fn publish(&self, content: PostContent, slot_label: SlotLabel) -> PostRecord {
        let timeout = *self.config.provider_timeout();
        let excerpt = PostRecord::excerpt_of(content.text());

        let outcome = match tokio::time::timeout(timeout, self.publisher.publish(&content)).await {
            Ok(result) => result,
            Err(_) => Err(giotto_error::PublishError::new(
                giotto_error::PublishErrorKind::Network(format!(
                    "publish timed out after {}s",
                    timeout.as_secs()
                )),
            )),
        };

        match outcome {
            Ok(remote_id) => {
                tracing::info!(
                    platform = self.publisher.platform_name(),
                    remote_id = %remote_id,
                    "Post published"
                );
                PostRecord::builder()
                    .timestamp(Utc::now())
                    .slot_label(slot_label)
                    .content_excerpt(excerpt)
                    .outcome(PostOutcome::Success)
                    .remote_id(Some(remote_id))
                    .build()
            }
            Err(e) => {
                // Failure classes get distinct log lines; the record treats
                // them uniformly. No retry inside the cycle.
                let platform = self.publisher.platform_name();
                if e.is_authentication() {
                    tracing::error!(platform, error = %e, "Publish authentication failed");
                } else if e.is_rate_limited() {
                    tracing::error!(platform, error = %e, "Publish rate limited");
                } else if e.is_network() {
                    tracing::error!(platform, error = %e, "Publish network failure");
                } else {
                    tracing::error!(platform, error = %e, "Publish failed");
                }

                PostRecord::builder()
                    .timestamp(Utc::now())
                    .slot_label(slot_label)
                    .content_excerpt(excerpt)
                    .outcome(PostOutcome::Failure)
                    .error_detail(Some(e.to_string()))
                    .build()
            }
        }
    }
}
