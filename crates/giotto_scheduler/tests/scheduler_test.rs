//! Integration tests for the scheduler, run against stubbed providers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use giotto_core::{
    FallbackPool, MediaArtifact, MediaType, PostContent, PostOutcome, RemotePostId, Schedule,
};
use giotto_error::{ProviderError, ProviderErrorKind, PublishError, PublishErrorKind};
use giotto_history::PostHistory;
use giotto_interface::{ContentProvider, MediaProvider, Publisher};
use giotto_scheduler::{DedupMode, Scheduler, SchedulerConfig};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

/// Content provider that always returns the same text.
struct FixedContent(&'static str);

#[async_trait]
impl ContentProvider for FixedContent {
    async fn generate(&self, _topic_hint: &str) -> Result<String, ProviderError> {
        Ok(self.0.to_string())
    }

    fn provider_name(&self) -> &'static str {
        "fixed"
    }
}

/// Content provider that always fails.
struct FailingContent;

#[async_trait]
impl ContentProvider for FailingContent {
    async fn generate(&self, _topic_hint: &str) -> Result<String, ProviderError> {
        Err(ProviderError::new(ProviderErrorKind::Api {
            status: 500,
            message: "backend down".to_string(),
        }))
    }

    fn provider_name(&self) -> &'static str {
        "failing"
    }
}

/// Media provider that reports a synthetic artifact without touching disk.
struct FixedMedia;

#[async_trait]
impl MediaProvider for FixedMedia {
    async fn create_image(
        &self,
        _text: &str,
        output_hint: &str,
    ) -> Result<MediaArtifact, ProviderError> {
        Ok(MediaArtifact::new(
            format!("/tmp/{output_hint}.png"),
            MediaType::Png,
        ))
    }

    fn provider_name(&self) -> &'static str {
        "fixed"
    }
}

/// Media provider that always fails.
struct FailingMedia;

#[async_trait]
impl MediaProvider for FailingMedia {
    async fn create_image(
        &self,
        _text: &str,
        _output_hint: &str,
    ) -> Result<MediaArtifact, ProviderError> {
        Err(ProviderError::new(ProviderErrorKind::EmptyResponse))
    }

    fn provider_name(&self) -> &'static str {
        "failing"
    }
}

/// Publisher that counts calls and fails the first `fail_first` of them.
struct CountingPublisher {
    calls: AtomicU32,
    fail_first: u32,
}

impl CountingPublisher {
    fn succeeding() -> Self {
        Self {
            calls: AtomicU32::new(0),
            fail_first: 0,
        }
    }

    fn failing() -> Self {
        Self {
            calls: AtomicU32::new(0),
            fail_first: u32::MAX,
        }
    }

    fn failing_once() -> Self {
        Self {
            calls: AtomicU32::new(0),
            fail_first: 1,
        }
    }

    fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Publisher for CountingPublisher {
    async fn publish(&self, _content: &PostContent) -> Result<RemotePostId, PublishError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.fail_first {
            return Err(PublishError::new(PublishErrorKind::Network(
                "connection reset".to_string(),
            )));
        }
        Ok(RemotePostId(format!("post-{call}")))
    }

    async fn verify_connection(&self) -> Result<(), PublishError> {
        Ok(())
    }

    fn platform_name(&self) -> &'static str {
        "counting"
    }
}

async fn scheduler_with(
    content: Arc<dyn ContentProvider>,
    media: Arc<dyn MediaProvider>,
    publisher: Arc<dyn Publisher>,
    config: SchedulerConfig,
) -> (Scheduler, TempDir) {
    let dir = TempDir::new().unwrap();
    let history = PostHistory::open(dir.path().join("history.json"))
        .await
        .unwrap();
    (
        Scheduler::new(content, media, publisher, history, config),
        dir,
    )
}

fn today_at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc::now()
        .date_naive()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
        .and_utc()
}

#[tokio::test]
async fn run_immediate_appends_one_manual_record_per_cycle() {
    let publisher = Arc::new(CountingPublisher::succeeding());
    let (mut scheduler, _dir) = scheduler_with(
        Arc::new(FixedContent("a fine quote #Wisdom")),
        Arc::new(FixedMedia),
        publisher.clone(),
        SchedulerConfig::default(),
    )
    .await;

    let records = scheduler.run_immediate(3).await.unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(publisher.call_count(), 3);
    for record in &records {
        assert!(record.slot_label().is_manual());
        assert_eq!(*record.outcome(), PostOutcome::Success);
        assert!(record.remote_id().is_some());
        assert!(record.error_detail().is_none());
    }
    assert_eq!(scheduler.history().len(), 3);
}

#[tokio::test]
async fn run_immediate_rejects_zero_count() {
    let (mut scheduler, _dir) = scheduler_with(
        Arc::new(FixedContent("text")),
        Arc::new(FixedMedia),
        Arc::new(CountingPublisher::succeeding()),
        SchedulerConfig::default(),
    )
    .await;

    assert!(scheduler.run_immediate(0).await.is_err());
    assert!(scheduler.history().is_empty());
}

#[tokio::test]
async fn failing_providers_still_produce_exactly_one_record() {
    let (mut scheduler, _dir) = scheduler_with(
        Arc::new(FailingContent),
        Arc::new(FailingMedia),
        Arc::new(CountingPublisher::succeeding()),
        SchedulerConfig::default(),
    )
    .await;

    let records = scheduler.run_immediate(1).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(scheduler.history().len(), 1);

    // The excerpt comes from the deterministic fallback pool
    let expected = FallbackPool::quotes().select(0).to_string();
    assert!(expected.starts_with(records[0].content_excerpt().as_str()));
    assert_eq!(*records[0].outcome(), PostOutcome::Success);
}

#[tokio::test]
async fn empty_content_degrades_to_fallback() {
    let (mut scheduler, _dir) = scheduler_with(
        Arc::new(FixedContent("   ")),
        Arc::new(FixedMedia),
        Arc::new(CountingPublisher::succeeding()),
        SchedulerConfig::default(),
    )
    .await;

    let records = scheduler.run_immediate(1).await.unwrap();
    let expected = FallbackPool::quotes().select(0).to_string();
    assert!(expected.starts_with(records[0].content_excerpt().as_str()));
}

#[tokio::test]
async fn dry_run_skips_publisher_but_records_the_cycle() {
    let publisher = Arc::new(CountingPublisher::succeeding());
    let config = SchedulerConfig::builder().dry_run(true).build();
    let (mut scheduler, _dir) = scheduler_with(
        Arc::new(FixedContent("text")),
        Arc::new(FixedMedia),
        publisher.clone(),
        config,
    )
    .await;

    let records = scheduler.run_immediate(1).await.unwrap();

    assert_eq!(publisher.call_count(), 0);
    assert_eq!(*records[0].outcome(), PostOutcome::DryRun);
    assert!(records[0].remote_id().is_none());
    assert_eq!(scheduler.history().len(), 1);
}

#[tokio::test]
async fn publish_failure_is_recorded_and_does_not_abort_later_cycles() {
    let publisher = Arc::new(CountingPublisher::failing());
    let (mut scheduler, _dir) = scheduler_with(
        Arc::new(FixedContent("text")),
        Arc::new(FixedMedia),
        publisher.clone(),
        SchedulerConfig::default(),
    )
    .await;

    let records = scheduler.run_immediate(2).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(publisher.call_count(), 2);
    for record in &records {
        assert_eq!(*record.outcome(), PostOutcome::Failure);
        assert!(record.error_detail().as_ref().unwrap().contains("connection reset"));
        assert!(record.remote_id().is_none());
    }
}

#[tokio::test]
async fn get_history_validates_days_and_orders_ascending() {
    let (mut scheduler, _dir) = scheduler_with(
        Arc::new(FixedContent("text")),
        Arc::new(FixedMedia),
        Arc::new(CountingPublisher::succeeding()),
        SchedulerConfig::default(),
    )
    .await;

    assert!(scheduler.get_history(0).is_err());
    assert!(scheduler.get_history(-3).is_err());

    scheduler.run_immediate(2).await.unwrap();
    let records = scheduler.get_history(7).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].timestamp() <= records[1].timestamp());
}

#[tokio::test]
async fn due_slot_fires_once_per_day() {
    let config = SchedulerConfig::builder()
        .schedule(Schedule::from_times(&["09:00", "14:00", "19:00"]).unwrap())
        .build();
    let (mut scheduler, _dir) = scheduler_with(
        Arc::new(FixedContent("text")),
        Arc::new(FixedMedia),
        Arc::new(CountingPublisher::succeeding()),
        config,
    )
    .await;

    // 09:01 - only the 09:00 slot is due and unsatisfied
    let fired = scheduler.run_due_slots(today_at(9, 1)).await;
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].slot_label().as_str(), "09:00");

    // 09:02 - the slot is satisfied, nothing fires
    let fired = scheduler.run_due_slots(today_at(9, 2)).await;
    assert!(fired.is_empty());

    // 14:01 - only the 14:00 slot fires
    let fired = scheduler.run_due_slots(today_at(14, 1)).await;
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].slot_label().as_str(), "14:00");

    assert_eq!(scheduler.history().len(), 2);
}

#[tokio::test]
async fn failed_slot_is_retried_on_next_poll_until_satisfied() {
    let publisher = Arc::new(CountingPublisher::failing_once());
    let config = SchedulerConfig::builder()
        .schedule(Schedule::from_times(&["09:00"]).unwrap())
        .build();
    let (mut scheduler, _dir) = scheduler_with(
        Arc::new(FixedContent("text")),
        Arc::new(FixedMedia),
        publisher.clone(),
        config,
    )
    .await;

    let first = scheduler.run_due_slots(today_at(9, 1)).await;
    assert_eq!(*first[0].outcome(), PostOutcome::Failure);

    // A Failure does not satisfy the slot; the next poll retries it
    let second = scheduler.run_due_slots(today_at(9, 2)).await;
    assert_eq!(second.len(), 1);
    assert_eq!(*second[0].outcome(), PostOutcome::Success);

    // Now satisfied: no further fires, and never two satisfied records
    let third = scheduler.run_due_slots(today_at(9, 3)).await;
    assert!(third.is_empty());

    let satisfied = scheduler
        .get_history(1)
        .unwrap()
        .into_iter()
        .filter(|r| r.outcome().satisfies_slot())
        .count();
    assert_eq!(satisfied, 1);
}

#[tokio::test]
async fn per_day_dedup_blocks_remaining_slots() {
    let config = SchedulerConfig::builder()
        .schedule(Schedule::from_times(&["09:00", "14:00"]).unwrap())
        .dedup(DedupMode::PerDay)
        .build();
    let (mut scheduler, _dir) = scheduler_with(
        Arc::new(FixedContent("text")),
        Arc::new(FixedMedia),
        Arc::new(CountingPublisher::succeeding()),
        config,
    )
    .await;

    // Both slots are due; per-day mode satisfies the day after one cycle
    let fired = scheduler.run_due_slots(today_at(15, 0)).await;
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].slot_label().as_str(), "09:00");

    let fired = scheduler.run_due_slots(today_at(15, 1)).await;
    assert!(fired.is_empty());
}

#[tokio::test]
async fn media_fallback_is_used_when_primary_fails() {
    let config = SchedulerConfig::default();
    let dir = TempDir::new().unwrap();
    let history = PostHistory::open(dir.path().join("history.json"))
        .await
        .unwrap();
    let publisher = Arc::new(CountingPublisher::succeeding());
    let mut scheduler = Scheduler::new(
        Arc::new(FixedContent("text")),
        Arc::new(FailingMedia),
        publisher,
        history,
        config,
    )
    .with_media_fallback(Arc::new(FixedMedia));

    let records = scheduler.run_immediate(1).await.unwrap();
    assert_eq!(*records[0].outcome(), PostOutcome::Success);
}

#[tokio::test]
async fn schedule_loop_stops_on_cancellation() {
    let config = SchedulerConfig::builder()
        .schedule(Schedule::from_times(&["00:00"]).unwrap())
        .dry_run(true)
        .build();
    let (mut scheduler, _dir) = scheduler_with(
        Arc::new(FixedContent("text")),
        Arc::new(FixedMedia),
        Arc::new(CountingPublisher::succeeding()),
        config,
    )
    .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        scheduler.run_schedule_loop(cancel),
    )
    .await;

    assert!(result.expect("loop must honor cancellation").is_ok());
}
