//! Scheduler configuration.

use derive_getters::Getters;
use giotto_core::{FallbackPool, Schedule};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use typed_builder::TypedBuilder;

/// Duplicate-prevention granularity.
///
/// The safer per-slot tracking is the default; per-day reproduces a
/// one-post-per-day policy where any satisfied cycle today blocks every
/// remaining slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupMode {
    /// One cycle per named slot per day.
    #[default]
    PerSlot,
    /// At most one satisfied cycle per day across all slots.
    PerDay,
}

/// Settings owned by the [`Scheduler`](crate::Scheduler).
#[derive(Debug, Clone, Getters, TypedBuilder)]
pub struct SchedulerConfig {
    /// Daily slots the polling loop fires on.
    #[builder(default)]
    schedule: Schedule,

    /// How often the loop re-evaluates due slots.
    #[builder(default = Duration::from_secs(60))]
    poll_interval: Duration,

    /// Time budget for each external provider call.
    #[builder(default = Duration::from_secs(60))]
    provider_timeout: Duration,

    /// Skip the publish step and record DryRun outcomes.
    #[builder(default = false)]
    dry_run: bool,

    /// Days of history to keep; older records are pruned on every write.
    #[builder(default = 30)]
    retention_days: u32,

    /// Duplicate-prevention granularity.
    #[builder(default)]
    dedup: DedupMode,

    /// Topic hint passed to the content provider.
    #[builder(default = "ignorant strength".to_string())]
    topic_hint: String,

    /// Texts substituted when the content provider degrades.
    #[builder(default = FallbackPool::quotes())]
    fallback: FallbackPool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
