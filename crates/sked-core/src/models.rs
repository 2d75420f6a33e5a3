use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use sqlx::FromRow;

use crate::date::CalendarDate;
use crate::rule::RecurrenceRule;

/// A stored task row.
///
/// The id goes over the wire as a decimal string, e.g. `{"id": "42", ...}`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    #[serde_as(as = "DisplayFromStr")]
    pub id: i64,
    #[sqlx(try_from = "String")]
    pub date: CalendarDate,
    pub title: String,
    pub comment: String,
    #[sqlx(try_from = "String")]
    pub repeat: RecurrenceRule,
}

/// Raw payload for creating a task, as clients send it.
///
/// An empty `date` means today.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewTaskData {
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

/// Raw payload replacing every editable field of an existing task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateTaskData {
    pub id: String,
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

impl UpdateTaskData {
    /// Starts an edit from the stored values of `task`.
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            date: task.date.to_string(),
            title: task.title.clone(),
            comment: task.comment.clone(),
            repeat: task.repeat.to_string(),
        }
    }
}

/// A validated task that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub date: CalendarDate,
    pub title: String,
    pub comment: String,
    pub repeat: RecurrenceRule,
}

impl NewTask {
    pub fn into_task(self, id: i64) -> Task {
        Task {
            id,
            date: self.date,
            title: self.title,
            comment: self.comment,
            repeat: self.repeat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    /// A one-off task, now deleted.
    Removed(Task),
    /// A recurring task moved to its next occurrence.
    Rescheduled { task: Task, previous: CalendarDate },
}
