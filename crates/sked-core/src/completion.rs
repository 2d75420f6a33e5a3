//! What "done" means for a task.
//!
//! A one-off task leaves the collection; a recurring one stays and moves to
//! its next occurrence. The storage layer carries out the returned decision.

use chrono::NaiveDateTime;

use crate::date::CalendarDate;
use crate::error::ScheduleError;
use crate::recurrence::next_occurrence;
use crate::rule::RecurrenceRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Remove the task.
    Delete,
    /// Keep the task and replace its date.
    Reschedule(CalendarDate),
}

pub fn complete(
    now: NaiveDateTime,
    date: CalendarDate,
    rule: RecurrenceRule,
) -> Result<Completion, ScheduleError> {
    if !rule.is_recurring() {
        return Ok(Completion::Delete);
    }
    next_occurrence(now, date, rule).map(Completion::Reschedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    #[test]
    fn test_one_off_task_is_deleted() {
        let now = date("20240310").at_midnight();
        assert_eq!(
            complete(now, date("20240310"), RecurrenceRule::None),
            Ok(Completion::Delete)
        );
        assert_eq!(
            complete(now, date("20200101"), RecurrenceRule::None),
            Ok(Completion::Delete)
        );
    }

    #[rstest]
    #[case("20240310", RecurrenceRule::EveryNDays(1), "20240310")]
    #[case("20240312", RecurrenceRule::EveryNDays(1), "20240313")]
    #[case("20240310", RecurrenceRule::EveryNDays(3), "20240313")]
    #[case("20240301", RecurrenceRule::EveryNDays(7), "20240315")]
    #[case("20240310", RecurrenceRule::Yearly, "20250310")]
    fn test_recurring_task_is_rescheduled(
        #[case] stored: &str,
        #[case] rule: RecurrenceRule,
        #[case] expected: &str,
    ) {
        let now = date("20240310").at_midnight();
        assert_eq!(
            complete(now, date(stored), rule),
            Ok(Completion::Reschedule(date(expected)))
        );
    }

    #[test]
    fn test_engine_errors_propagate() {
        let now = date("20240310").at_midnight();
        assert_eq!(
            complete(now, date("20240310"), RecurrenceRule::EveryNDays(0)),
            Err(ScheduleError::RuleOutOfRange(0))
        );
    }
}
