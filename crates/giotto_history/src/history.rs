//! JSON-file-backed post history.

use chrono::{DateTime, NaiveDate, Utc};
use giotto_core::{PostRecord, SlotLabel};
use giotto_error::{StorageError, StorageErrorKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Read order for history reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Oldest first (storage order).
    Ascending,
    /// Most recent first.
    Descending,
}

/// On-disk representation of the history file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryFile {
    posts: Vec<PostRecord>,
}

/// Durable, append-and-prune log of past posting attempts.
///
/// Records are held in memory sorted ascending by timestamp; the volume (a
/// few records per day inside the retention window) never justifies an
/// index.
#[derive(Debug)]
pub struct PostHistory {
    path: PathBuf,
    records: Vec<PostRecord>,
}

impl PostHistory {
    /// Open a history store backed by the given file.
    ///
    /// A missing file is an empty store; parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed, or the
    /// parent directory cannot be created.
    #[tracing::instrument(skip(path))]
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let records = if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            let json = tokio::fs::read_to_string(&path).await.map_err(|e| {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            })?;

            let file: HistoryFile = serde_json::from_str(&json)?;
            let mut posts = file.posts;
            posts.sort_by_key(|r| *r.timestamp());
            posts
        } else {
            Vec::new()
        };

        tracing::debug!(path = %path.display(), records = records.len(), "Opened post history");
        Ok(Self { path, records })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check whether a slot is satisfied on the given calendar day (UTC).
    ///
    /// Only Success and DryRun outcomes satisfy a slot; a prior Failure
    /// leaves it open for the next due evaluation.
    pub fn is_slot_satisfied(&self, slot_label: &SlotLabel, reference_date: NaiveDate) -> bool {
        self.records.iter().any(|r| {
            r.slot_label() == slot_label
                && r.timestamp().date_naive() == reference_date
                && r.outcome().satisfies_slot()
        })
    }

    /// Check whether any slot was satisfied on the given calendar day (UTC).
    ///
    /// Backs the per-day duplicate-prevention mode.
    pub fn is_day_satisfied(&self, reference_date: NaiveDate) -> bool {
        self.records.iter().any(|r| {
            r.timestamp().date_naive() == reference_date && r.outcome().satisfies_slot()
        })
    }

    /// Append one record and persist synchronously.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written. Never swallowed: losing
    /// history silently would break duplicate prevention.
    #[tracing::instrument(skip(self, record), fields(slot = %record.slot_label(), outcome = %record.outcome()))]
    pub async fn append(&mut self, record: PostRecord) -> Result<(), StorageError> {
        let at = self
            .records
            .partition_point(|r| r.timestamp() <= record.timestamp());
        self.records.insert(at, record);

        self.persist().await?;
        tracing::debug!(records = self.records.len(), "Appended post record");
        Ok(())
    }

    /// Remove records older than the retention window and persist.
    ///
    /// Idempotent: pruning an already-pruned store writes nothing.
    ///
    /// # Errors
    ///
    /// Returns error if the trimmed file cannot be written.
    #[tracing::instrument(skip(self))]
    pub async fn prune(&mut self, retention_days: u32) -> Result<usize, StorageError> {
        let cutoff = Utc::now() - chrono::Duration::days(i64::from(retention_days));
        let before = self.records.len();
        self.records.retain(|r| *r.timestamp() >= cutoff);
        let removed = before - self.records.len();

        if removed > 0 {
            self.persist().await?;
            tracing::info!(removed, retention_days, "Pruned stale history records");
        }

        Ok(removed)
    }

    /// Records at or after `since`, ascending by timestamp.
    pub fn query(&self, since: DateTime<Utc>) -> Vec<PostRecord> {
        self.records
            .iter()
            .filter(|r| *r.timestamp() >= since)
            .cloned()
            .collect()
    }

    /// Records from the last `days` days in the requested order.
    pub fn records_within(&self, days: i64, order: Order) -> Vec<PostRecord> {
        let since = Utc::now() - chrono::Duration::days(days);
        let mut records = self.query(since);
        if order == Order::Descending {
            records.reverse();
        }
        records
    }

    /// Atomically replace the on-disk file with the in-memory state.
    async fn persist(&self) -> Result<(), StorageError> {
        let file = HistoryFile {
            posts: self.records.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, json).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &self.path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            )))
        })?;

        Ok(())
    }
}
