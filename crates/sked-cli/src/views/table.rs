use chrono::Duration;
use chrono_humanize::{Accuracy, HumanTime, Tense};
use comfy_table::{Attribute, Cell, Color, Row, Table};
use sked_core::date::CalendarDate;
use sked_core::models::Task;
use sked_core::rule::RecurrenceRule;

pub fn display_tasks(tasks: &[Task], today: CalendarDate) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    println!("{}", tasks_table(tasks, today));
}

pub fn tasks_table(tasks: &[Task], today: CalendarDate) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "When", "Title", "Repeat", "Comment"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(task.id));
        row.add_cell(Cell::new(task.date));
        row.add_cell(when_cell(task.date, today));

        let mut title = String::new();
        if task.repeat.is_recurring() {
            title.push('↻'); // Recurring symbol
            title.push(' ');
        }
        title.push_str(&task.title);
        row.add_cell(Cell::new(title).add_attribute(Attribute::Bold));

        row.add_cell(Cell::new(describe_rule(task.repeat)));
        row.add_cell(Cell::new(&task.comment).fg(Color::DarkGrey));
        table.add_row(row);
    }

    table
}

/// Multi-line detail view used by `show`.
pub fn display_task(task: &Task, today: CalendarDate) {
    let mut table = Table::new();
    table.add_row(vec![Cell::new("ID"), Cell::new(task.id)]);
    table.add_row(vec![Cell::new("Title"), Cell::new(&task.title)]);
    table.add_row(vec![
        Cell::new("Date"),
        Cell::new(format!("{} ({})", task.date, relative_day(task.date, today))),
    ]);
    table.add_row(vec![Cell::new("Repeat"), Cell::new(describe_rule(task.repeat))]);
    table.add_row(vec![Cell::new("Comment"), Cell::new(&task.comment)]);
    println!("{table}");
}

pub fn describe_rule(rule: RecurrenceRule) -> String {
    match rule {
        RecurrenceRule::None => "-".to_string(),
        RecurrenceRule::Yearly => "yearly".to_string(),
        RecurrenceRule::EveryNDays(1) => "daily".to_string(),
        RecurrenceRule::EveryNDays(n) => format!("every {} days", n),
    }
}

pub fn relative_day(date: CalendarDate, today: CalendarDate) -> String {
    let days = date.days_since(today);
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        _ => {
            let tense = if days > 0 { Tense::Future } else { Tense::Past };
            HumanTime::from(Duration::days(days.abs())).to_text_en(Accuracy::Rough, tense)
        }
    }
}

fn when_cell(date: CalendarDate, today: CalendarDate) -> Cell {
    let cell = Cell::new(relative_day(date, today));
    if date < today {
        cell.fg(Color::Red) // Overdue
    } else if date == today {
        cell.fg(Color::Yellow) // Due today
    } else {
        cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    #[rstest]
    #[case("20240310", "today")]
    #[case("20240311", "tomorrow")]
    #[case("20240309", "yesterday")]
    fn test_relative_day_named(#[case] day: &str, #[case] expected: &str) {
        assert_eq!(relative_day(date(day), date("20240310")), expected);
    }

    #[test]
    fn test_relative_day_humanized() {
        let today = date("20240310");
        assert!(relative_day(date("20240320"), today).starts_with("in "));
        assert!(relative_day(date("20240201"), today).ends_with(" ago"));
    }

    #[rstest]
    #[case(RecurrenceRule::None, "-")]
    #[case(RecurrenceRule::Yearly, "yearly")]
    #[case(RecurrenceRule::EveryNDays(1), "daily")]
    #[case(RecurrenceRule::EveryNDays(14), "every 14 days")]
    fn test_describe_rule(#[case] rule: RecurrenceRule, #[case] expected: &str) {
        assert_eq!(describe_rule(rule), expected);
    }

    #[test]
    fn test_table_lists_every_task() {
        let tasks = vec![
            Task {
                id: 1,
                date: date("20240310"),
                title: "Stretch".to_string(),
                comment: String::new(),
                repeat: RecurrenceRule::EveryNDays(1),
            },
            Task {
                id: 2,
                date: date("20240401"),
                title: "Taxes".to_string(),
                comment: "bring receipts".to_string(),
                repeat: RecurrenceRule::None,
            },
        ];
        let rendered = tasks_table(&tasks, date("20240310")).to_string();
        assert!(rendered.contains("↻ Stretch"));
        assert!(rendered.contains("20240401"));
        assert!(rendered.contains("bring receipts"));
    }
}
