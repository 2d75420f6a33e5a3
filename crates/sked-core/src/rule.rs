//! Textual recurrence rules: `""`, `"y"` and `"d <n>"`.

use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;

/// Smallest accepted day interval for `d <n>`.
pub const MIN_INTERVAL_DAYS: i64 = 1;
/// Largest accepted day interval for `d <n>`.
pub const MAX_INTERVAL_DAYS: i64 = 400;

/// How often a task repeats.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, SerializeDisplay, DeserializeFromStr,
)]
pub enum RecurrenceRule {
    /// Empty rule: the task happens once.
    #[default]
    None,
    /// `y`: same month and day every year.
    Yearly,
    /// `d <n>`: every `n` days, `1 <= n <= 400`.
    EveryNDays(u16),
}

impl RecurrenceRule {
    /// Builds an `EveryNDays` rule, rejecting intervals outside `1..=400`.
    pub fn every_n_days(days: i64) -> Result<Self, ScheduleError> {
        if !(MIN_INTERVAL_DAYS..=MAX_INTERVAL_DAYS).contains(&days) {
            return Err(ScheduleError::RuleOutOfRange(days));
        }
        let days = u16::try_from(days).map_err(|_| ScheduleError::RuleOutOfRange(days))?;
        Ok(RecurrenceRule::EveryNDays(days))
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, RecurrenceRule::None)
    }
}

impl FromStr for RecurrenceRule {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(RecurrenceRule::None);
        }
        if s == "y" {
            return Ok(RecurrenceRule::Yearly);
        }
        if let Some(days) = s.strip_prefix("d ") {
            let days: i64 = days
                .parse()
                .map_err(|_| ScheduleError::UnsupportedRule(s.to_string()))?;
            return Self::every_n_days(days);
        }
        Err(ScheduleError::UnsupportedRule(s.to_string()))
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceRule::None => Ok(()),
            RecurrenceRule::Yearly => f.write_str("y"),
            RecurrenceRule::EveryNDays(days) => write!(f, "d {}", days),
        }
    }
}

impl TryFrom<String> for RecurrenceRule {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
