//! Post attempt records.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Maximum number of characters kept in a record's content excerpt.
const EXCERPT_CHARS: usize = 100;

/// Outcome of one generation-and-publish cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum PostOutcome {
    /// The post was published and the platform returned an identifier.
    #[display("success")]
    Success,
    /// The publish step failed; details are in `error_detail`.
    #[display("failure")]
    Failure,
    /// The publish step was deliberately skipped.
    #[display("dry_run")]
    DryRun,
}

impl PostOutcome {
    /// Check whether this outcome satisfies a schedule slot.
    ///
    /// A failed attempt leaves the slot open for the next due evaluation.
    pub fn satisfies_slot(&self) -> bool {
        matches!(self, Self::Success | Self::DryRun)
    }
}

/// Platform-assigned identifier of a published post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", _0)]
pub struct RemotePostId(pub String);

impl From<&str> for RemotePostId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Identifier of the schedule slot that triggered a cycle.
///
/// Scheduled cycles use the slot's `"HH:MM"` time string; immediate runs use
/// the `"manual"` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", _0)]
pub struct SlotLabel(String);

impl SlotLabel {
    /// Label reserved for immediate and manual runs.
    const MANUAL: &'static str = "manual";

    /// Create a slot label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The sentinel label for immediate/manual cycles.
    pub fn manual() -> Self {
        Self(Self::MANUAL.to_string())
    }

    /// Check whether this is the manual sentinel.
    pub fn is_manual(&self) -> bool {
        self.0 == Self::MANUAL
    }

    /// The label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SlotLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// One entry per attempted post.
///
/// A record is created exactly once, immediately after a publish attempt
/// concludes, and is never mutated afterwards; the retention-pruning step is
/// the only thing that removes it.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, TypedBuilder)]
pub struct PostRecord {
    /// Moment the attempt was finalized.
    timestamp: DateTime<Utc>,

    /// Slot that triggered the attempt, or the manual sentinel.
    slot_label: SlotLabel,

    /// Short summary of the generated text, for audit output.
    content_excerpt: String,

    /// How the cycle ended.
    outcome: PostOutcome,

    /// Identifier returned by the publisher on success.
    #[builder(default)]
    #[serde(default)]
    remote_id: Option<RemotePostId>,

    /// Human-readable failure reason, present only on failure.
    #[builder(default)]
    #[serde(default)]
    error_detail: Option<String>,
}

impl PostRecord {
    /// Produce the excerpt stored in a record from the full post text.
    ///
    /// Truncates at a character boundary, never mid-codepoint.
    pub fn excerpt_of(text: &str) -> String {
        text.chars().take(EXCERPT_CHARS).collect()
    }
}
