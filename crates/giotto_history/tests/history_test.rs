//! Integration tests for the post history store.

use chrono::{DateTime, Duration, Utc};
use giotto_core::{PostOutcome, PostRecord, RemotePostId, SlotLabel};
use giotto_history::{Order, PostHistory};
use tempfile::TempDir;

fn record(timestamp: DateTime<Utc>, slot: &str, outcome: PostOutcome) -> PostRecord {
    PostRecord::builder()
        .timestamp(timestamp)
        .slot_label(SlotLabel::new(slot))
        .content_excerpt("an excerpt".to_string())
        .outcome(outcome)
        .remote_id(matches!(outcome, PostOutcome::Success).then(|| RemotePostId::from("42")))
        .build()
}

#[tokio::test]
async fn missing_file_is_empty_store() {
    let dir = TempDir::new().unwrap();
    let history = PostHistory::open(dir.path().join("history.json"))
        .await
        .unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn append_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");

    let mut history = PostHistory::open(&path).await.unwrap();
    history
        .append(record(Utc::now(), "09:00", PostOutcome::Success))
        .await
        .unwrap();

    let reopened = PostHistory::open(&path).await.unwrap();
    assert_eq!(reopened.len(), 1);

    // Atomic write leaves no temp file behind
    assert!(!path.with_extension("tmp").exists());
}

#[tokio::test]
async fn success_and_dry_run_satisfy_slot_but_failure_does_not() {
    let dir = TempDir::new().unwrap();
    let mut history = PostHistory::open(dir.path().join("history.json"))
        .await
        .unwrap();

    let now = Utc::now();
    let today = now.date_naive();

    history
        .append(record(now, "09:00", PostOutcome::Failure))
        .await
        .unwrap();
    assert!(!history.is_slot_satisfied(&SlotLabel::new("09:00"), today));

    history
        .append(record(now, "09:00", PostOutcome::Success))
        .await
        .unwrap();
    assert!(history.is_slot_satisfied(&SlotLabel::new("09:00"), today));

    history
        .append(record(now, "14:00", PostOutcome::DryRun))
        .await
        .unwrap();
    assert!(history.is_slot_satisfied(&SlotLabel::new("14:00"), today));

    // A different slot or a different day is not satisfied
    assert!(!history.is_slot_satisfied(&SlotLabel::new("19:00"), today));
    assert!(!history.is_slot_satisfied(&SlotLabel::new("09:00"), today - Duration::days(1)));
}

#[tokio::test]
async fn day_satisfaction_ignores_slot_labels() {
    let dir = TempDir::new().unwrap();
    let mut history = PostHistory::open(dir.path().join("history.json"))
        .await
        .unwrap();

    let now = Utc::now();
    let today = now.date_naive();

    assert!(!history.is_day_satisfied(today));

    history
        .append(record(now, "09:00", PostOutcome::Failure))
        .await
        .unwrap();
    assert!(!history.is_day_satisfied(today));

    history
        .append(record(now, "09:00", PostOutcome::DryRun))
        .await
        .unwrap();
    assert!(history.is_day_satisfied(today));
}

#[tokio::test]
async fn prune_removes_only_stale_records_and_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let mut history = PostHistory::open(dir.path().join("history.json"))
        .await
        .unwrap();

    let now = Utc::now();
    history
        .append(record(now - Duration::days(45), "09:00", PostOutcome::Success))
        .await
        .unwrap();
    history
        .append(record(now - Duration::days(31), "14:00", PostOutcome::Success))
        .await
        .unwrap();
    history
        .append(record(now - Duration::days(5), "19:00", PostOutcome::Success))
        .await
        .unwrap();
    history
        .append(record(now, "09:00", PostOutcome::Success))
        .await
        .unwrap();

    let removed = history.prune(30).await.unwrap();
    assert_eq!(removed, 2);
    assert_eq!(history.len(), 2);

    let removed_again = history.prune(30).await.unwrap();
    assert_eq!(removed_again, 0);
    assert_eq!(history.len(), 2);
}

#[tokio::test]
async fn query_returns_ascending_even_for_out_of_order_appends() {
    let dir = TempDir::new().unwrap();
    let mut history = PostHistory::open(dir.path().join("history.json"))
        .await
        .unwrap();

    let now = Utc::now();
    history
        .append(record(now, "19:00", PostOutcome::Success))
        .await
        .unwrap();
    history
        .append(record(now - Duration::hours(10), "09:00", PostOutcome::Success))
        .await
        .unwrap();
    history
        .append(record(now - Duration::hours(5), "14:00", PostOutcome::Success))
        .await
        .unwrap();

    let records = history.query(now - Duration::days(1));
    let labels: Vec<&str> = records.iter().map(|r| r.slot_label().as_str()).collect();
    assert_eq!(labels, vec!["09:00", "14:00", "19:00"]);
}

#[tokio::test]
async fn records_within_windows_and_orders() {
    let dir = TempDir::new().unwrap();
    let mut history = PostHistory::open(dir.path().join("history.json"))
        .await
        .unwrap();

    let now = Utc::now();
    history
        .append(record(now - Duration::days(10), "09:00", PostOutcome::Success))
        .await
        .unwrap();
    history
        .append(record(now - Duration::days(2), "14:00", PostOutcome::Success))
        .await
        .unwrap();
    history
        .append(record(now - Duration::hours(1), "19:00", PostOutcome::Failure))
        .await
        .unwrap();

    let week = history.records_within(7, Order::Ascending);
    assert_eq!(week.len(), 2);
    assert_eq!(week[0].slot_label().as_str(), "14:00");

    let newest_first = history.records_within(7, Order::Descending);
    assert_eq!(newest_first[0].slot_label().as_str(), "19:00");
}

#[tokio::test]
async fn corrupt_file_is_a_storage_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    assert!(PostHistory::open(&path).await.is_err());
}

#[tokio::test]
async fn file_is_human_inspectable_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");

    let mut history = PostHistory::open(&path).await.unwrap();
    history
        .append(record(Utc::now(), "manual", PostOutcome::DryRun))
        .await
        .unwrap();

    let text = tokio::fs::read_to_string(&path).await.unwrap();
    assert!(text.contains("\"posts\""));
    assert!(text.contains("\"dry_run\""));
    assert!(text.contains("manual"));
}
