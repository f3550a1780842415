//! Schedule slots and due-time evaluation.
//!
//! All slot comparisons use UTC so daylight-saving transitions cannot make a
//! slot fire twice or not at all.

use crate::SlotLabel;
use chrono::{DateTime, NaiveTime, Utc};
use derive_getters::Getters;
use giotto_error::{ConfigError, ConfigErrorKind};

/// A configured time-of-day at which one cycle should fire per day.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ScheduleSlot {
    /// Label recorded with cycles this slot triggers (its `"HH:MM"` string).
    label: SlotLabel,
    /// Time of day, UTC.
    time_of_day: NaiveTime,
}

impl ScheduleSlot {
    /// Parse a slot from an `"HH:MM"` string.
    ///
    /// # Errors
    ///
    /// Returns error if the string is not a valid 24-hour time.
    pub fn parse(time: &str) -> Result<Self, ConfigError> {
        let time_of_day = NaiveTime::parse_from_str(time, "%H:%M").map_err(|e| {
            ConfigError::new(ConfigErrorKind::Invalid(format!(
                "bad schedule time {:?}: {}",
                time, e
            )))
        })?;

        Ok(Self {
            label: SlotLabel::new(time),
            time_of_day,
        })
    }

    /// Check whether the slot time has passed at `now`.
    ///
    /// Due-ness alone does not fire a cycle; the caller must also confirm the
    /// slot is not already satisfied today.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now.time() >= self.time_of_day
    }
}

/// The configured set of daily slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    slots: Vec<ScheduleSlot>,
}

impl Schedule {
    /// Build a schedule from `"HH:MM"` strings.
    ///
    /// # Errors
    ///
    /// Returns error if any time fails to parse or a time appears twice.
    pub fn from_times<S: AsRef<str>>(times: &[S]) -> Result<Self, ConfigError> {
        let mut slots: Vec<ScheduleSlot> = Vec::with_capacity(times.len());

        for time in times {
            let slot = ScheduleSlot::parse(time.as_ref())?;
            if slots.iter().any(|s| s.label() == slot.label()) {
                return Err(ConfigError::new(ConfigErrorKind::Invalid(format!(
                    "duplicate schedule time {:?}",
                    time.as_ref()
                ))));
            }
            slots.push(slot);
        }

        slots.sort_by_key(|s| *s.time_of_day());
        Ok(Self { slots })
    }

    /// The slots, ordered by time of day.
    pub fn slots(&self) -> &[ScheduleSlot] {
        &self.slots
    }

    /// Number of configured slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check whether no slots are configured.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The default posting times (three posts per day).
    pub fn default_times() -> Vec<String> {
        vec![
            "09:00".to_string(),
            "14:00".to_string(),
            "19:00".to_string(),
        ]
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::from_times(&Self::default_times()).expect("default schedule times are valid")
    }
}
