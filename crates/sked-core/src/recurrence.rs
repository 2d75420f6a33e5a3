//! Finds the next date a recurring task falls due.

use chrono::NaiveDateTime;

use crate::date::CalendarDate;
use crate::error::ScheduleError;
use crate::rule::{RecurrenceRule, MAX_INTERVAL_DAYS, MIN_INTERVAL_DAYS};

/// Computes the next occurrence of a recurring task.
///
/// # Arguments
/// * `now` - Reference instant; only its calendar day is used
/// * `date` - The task's currently stored date
/// * `rule` - Recurrence rule, must not be [`RecurrenceRule::None`]
///
/// # Returns
/// * `Result<CalendarDate, ScheduleError>` - First occurrence strictly after today
///
/// # Behavior
/// - `d 1` with a date on or before today returns today itself
/// - Otherwise step forward by `n` days or one year at a time, always at least
///   once, until the candidate is strictly after today
/// - A candidate equal to today is never returned outside the `d 1` case
pub fn next_occurrence(
    now: NaiveDateTime,
    date: CalendarDate,
    rule: RecurrenceRule,
) -> Result<CalendarDate, ScheduleError> {
    let today = CalendarDate::from_instant(now);

    match rule {
        RecurrenceRule::None => Err(ScheduleError::MissingRule),
        RecurrenceRule::EveryNDays(1) if date <= today => Ok(today),
        RecurrenceRule::EveryNDays(days) => {
            let days = i64::from(days);
            if !(MIN_INTERVAL_DAYS..=MAX_INTERVAL_DAYS).contains(&days) {
                return Err(ScheduleError::RuleOutOfRange(days));
            }
            advance_by_days(date, today, days)
        }
        RecurrenceRule::Yearly => advance_by_years(date, today),
    }
}

/// String-level entry point used by the next-date query.
///
/// Checks the rule is present, then parses the date, then the rule.
pub fn next_date(now: NaiveDateTime, date: &str, rule: &str) -> Result<CalendarDate, ScheduleError> {
    if rule.is_empty() {
        return Err(ScheduleError::MissingRule);
    }
    let date = CalendarDate::parse(date)?;
    let rule: RecurrenceRule = rule.parse()?;
    next_occurrence(now, date, rule)
}

/// Jumps straight to the step count the one-step-at-a-time loop would stop at.
fn advance_by_days(
    date: CalendarDate,
    today: CalendarDate,
    days: i64,
) -> Result<CalendarDate, ScheduleError> {
    let elapsed = today.days_since(date).max(0);
    let steps = elapsed / days + 1;

    u64::try_from(steps * days)
        .ok()
        .and_then(|offset| date.add_days(offset))
        .ok_or(ScheduleError::OutOfRange)
}

fn advance_by_years(
    mut candidate: CalendarDate,
    today: CalendarDate,
) -> Result<CalendarDate, ScheduleError> {
    loop {
        candidate = candidate.add_years(1).ok_or(ScheduleError::OutOfRange)?;
        if candidate > today {
            return Ok(candidate);
        }
    }
}
