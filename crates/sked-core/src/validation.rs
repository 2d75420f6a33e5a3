//! Checks applied to every task write before it reaches storage.
//!
//! The central rule: a date stored at validation time is never in the past.
//! Overdue one-off tasks snap to today; overdue recurring tasks roll forward
//! to their next occurrence.

use chrono::NaiveDateTime;

use crate::date::CalendarDate;
use crate::error::{CoreError, ScheduleError};
use crate::models::{NewTask, NewTaskData, Task, UpdateTaskData};
use crate::recurrence::next_occurrence;
use crate::rule::RecurrenceRule;

/// Longest accepted title, matching the `VARCHAR(256)` column.
pub const MAX_TITLE_CHARS: usize = 256;

/// Normalizes the date of a task about to be created or updated.
///
/// # Arguments
/// * `now` - Reference instant; compared at day granularity
/// * `raw_date` - Date as sent by the client, empty meaning today
/// * `rule` - The task's recurrence rule
///
/// # Returns
/// * `Result<CalendarDate, ScheduleError>` - Date to store
///
/// # Behavior
/// - Empty date returns today, whatever the rule
/// - Today or a future date is kept as is
/// - An overdue date becomes today without a rule, or the next occurrence with one
/// - Engine failures come back wrapped in `InvalidRecurrenceRule`
pub fn normalize_task_date(
    now: NaiveDateTime,
    raw_date: &str,
    rule: RecurrenceRule,
) -> Result<CalendarDate, ScheduleError> {
    let today = CalendarDate::from_instant(now);
    if raw_date.is_empty() {
        return Ok(today);
    }

    let date = CalendarDate::parse(raw_date)?;
    if date >= today {
        return Ok(date);
    }

    if !rule.is_recurring() {
        return Ok(today);
    }
    next_occurrence(now, date, rule).map_err(ScheduleError::into_recurrence_error)
}

/// Parses a client-supplied task id.
pub fn parse_task_id(raw: &str) -> Result<i64, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CoreError::InvalidInput("task id is not specified".to_string()));
    }
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CoreError::InvalidInput(format!("invalid task id '{}'", raw))),
    }
}

pub fn validate_new_task(now: NaiveDateTime, data: &NewTaskData) -> Result<NewTask, CoreError> {
    let title = validate_title(&data.title)?;
    let repeat = parse_rule(&data.repeat)?;
    let date = normalize_task_date(now, &data.date, repeat)?;

    Ok(NewTask {
        date,
        title,
        comment: data.comment.clone(),
        repeat,
    })
}

pub fn validate_task_update(now: NaiveDateTime, data: &UpdateTaskData) -> Result<Task, CoreError> {
    let id = parse_task_id(&data.id)?;
    let title = validate_title(&data.title)?;
    let repeat = parse_rule(&data.repeat)?;
    let date = normalize_task_date(now, &data.date, repeat)?;

    Ok(Task {
        id,
        date,
        title,
        comment: data.comment.clone(),
        repeat,
    })
}

fn validate_title(title: &str) -> Result<String, CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::InvalidInput("task title is required".to_string()));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(CoreError::InvalidInput(format!(
            "task title is longer than {} characters",
            MAX_TITLE_CHARS
        )));
    }
    Ok(title.to_string())
}

// Rejected even when the date is not overdue and the engine never runs.
fn parse_rule(raw: &str) -> Result<RecurrenceRule, ScheduleError> {
    raw.parse().map_err(ScheduleError::into_recurrence_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    const NOW: &str = "20240310";

    fn now() -> NaiveDateTime {
        CalendarDate::parse(NOW).unwrap().at_midnight()
    }

    fn rule(s: &str) -> RecurrenceRule {
        s.parse().unwrap()
    }

    mod normalize {
        use super::*;

        #[rstest]
        #[case("", "", "20240310")]
        #[case("", "d 5", "20240310")]
        #[case("", "y", "20240310")]
        #[case("20240301", "", "20240310")]
        #[case("20240310", "", "20240310")]
        #[case("20240311", "", "20240311")]
        #[case("20250101", "y", "20250101")]
        #[case("20240301", "d 7", "20240315")]
        #[case("20240309", "d 1", "20240310")]
        #[case("20230310", "y", "20250310")]
        #[case("20240310", "d 3", "20240310")]
        fn test_normalize(#[case] raw: &str, #[case] repeat: &str, #[case] expected: &str) {
            let date = normalize_task_date(now(), raw, rule(repeat)).unwrap();
            assert_eq!(date.to_string(), expected);
        }

        #[test]
        fn test_invalid_date_is_not_wrapped() {
            assert_eq!(
                normalize_task_date(now(), "2024-03-01", RecurrenceRule::Yearly),
                Err(ScheduleError::InvalidDate("2024-03-01".to_string()))
            );
        }

        #[test]
        fn test_engine_failure_is_wrapped() {
            let result =
                normalize_task_date(now(), "20240301", RecurrenceRule::EveryNDays(0));
            assert_eq!(
                result,
                Err(ScheduleError::InvalidRecurrenceRule(Box::new(
                    ScheduleError::RuleOutOfRange(0)
                )))
            );
        }
    }

    mod payloads {
        use super::*;

        fn new_data(date: &str, title: &str, repeat: &str) -> NewTaskData {
            NewTaskData {
                date: date.to_string(),
                title: title.to_string(),
                comment: "note".to_string(),
                repeat: repeat.to_string(),
            }
        }

        #[test]
        fn test_new_task_is_normalized() {
            let task = validate_new_task(now(), &new_data("20240301", "Water plants", "d 7")).unwrap();
            assert_eq!(task.date.to_string(), "20240315");
            assert_eq!(task.repeat, RecurrenceRule::EveryNDays(7));
            assert_eq!(task.comment, "note");
        }

        #[rstest]
        #[case("")]
        #[case("   ")]
        fn test_blank_title_is_rejected(#[case] title: &str) {
            let result = validate_new_task(now(), &new_data("", title, ""));
            assert!(matches!(result, Err(CoreError::InvalidInput(_))));
        }

        #[test]
        fn test_overlong_title_is_rejected() {
            let title = "x".repeat(MAX_TITLE_CHARS + 1);
            let result = validate_new_task(now(), &new_data("", &title, ""));
            assert!(matches!(result, Err(CoreError::InvalidInput(_))));
        }

        #[rstest]
        #[case("20250101", "w 3", ScheduleError::UnsupportedRule("w 3".to_string()))]
        #[case("", "d 401", ScheduleError::RuleOutOfRange(401))]
        #[case("20240301", "d zero", ScheduleError::UnsupportedRule("d zero".to_string()))]
        fn test_bad_rule_is_rejected_even_for_future_dates(
            #[case] date: &str,
            #[case] repeat: &str,
            #[case] cause: ScheduleError,
        ) {
            let result = validate_new_task(now(), &new_data(date, "Task", repeat));
            match result {
                Err(CoreError::Schedule(ScheduleError::InvalidRecurrenceRule(inner))) => {
                    assert_eq!(*inner, cause)
                }
                other => panic!("expected wrapped rule error, got {:?}", other),
            }
        }

        #[test]
        fn test_bad_date_is_rejected() {
            let result = validate_new_task(now(), &new_data("20241341", "Task", ""));
            assert!(matches!(
                result,
                Err(CoreError::Schedule(ScheduleError::InvalidDate(_)))
            ));
        }

        #[test]
        fn test_update_requires_valid_id() {
            let data = UpdateTaskData {
                id: "abc".to_string(),
                title: "Task".to_string(),
                ..Default::default()
            };
            assert!(matches!(
                validate_task_update(now(), &data),
                Err(CoreError::InvalidInput(_))
            ));
        }

        #[test]
        fn test_update_is_normalized() {
            let data = UpdateTaskData {
                id: "7".to_string(),
                date: "20240101".to_string(),
                title: "Gym".to_string(),
                comment: String::new(),
                repeat: String::new(),
            };
            let task = validate_task_update(now(), &data).unwrap();
            assert_eq!(task.id, 7);
            assert_eq!(task.date.to_string(), NOW);
        }

        #[rstest]
        #[case("1", Some(1))]
        #[case(" 12 ", Some(12))]
        #[case("0", None)]
        #[case("-3", None)]
        #[case("", None)]
        #[case("1e3", None)]
        fn test_parse_task_id(#[case] raw: &str, #[case] expected: Option<i64>) {
            assert_eq!(parse_task_id(raw).ok(), expected);
        }
    }

    fn any_date() -> impl Strategy<Value = CalendarDate> {
        (1950i32..2100, 1u32..=12, 1u32..=31)
            .prop_filter_map("real day", |(y, m, d)| CalendarDate::from_ymd(y, m, d))
    }

    fn any_rule() -> impl Strategy<Value = RecurrenceRule> {
        prop_oneof![
            Just(RecurrenceRule::None),
            Just(RecurrenceRule::Yearly),
            (1u16..=400).prop_map(RecurrenceRule::EveryNDays),
        ]
    }

    proptest! {
        #[test]
        fn prop_empty_date_is_today(today in any_date(), rule in any_rule()) {
            let date = normalize_task_date(today.at_midnight(), "", rule).unwrap();
            prop_assert_eq!(date, today);
        }

        #[test]
        fn prop_result_is_never_in_the_past(
            today in any_date(),
            raw in any_date(),
            rule in any_rule(),
        ) {
            let date = normalize_task_date(today.at_midnight(), &raw.to_string(), rule).unwrap();
            prop_assert!(date >= today);
        }
    }
}
