use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::date::CalendarDate;
use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{CompletionResult, NewTask, Task};

pub mod tasks;

/// Storage for task rows.
///
/// Writes receive values that already passed validation. Counts returned by
/// `update_*` and `delete_task` are affected rows; mapping zero to
/// `NotFound` is left to the caller.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn create_task(&self, task: &NewTask) -> Result<i64, CoreError>;
    async fn get_task(&self, id: i64) -> Result<Option<Task>, CoreError>;
    async fn update_task(&self, task: &Task) -> Result<u64, CoreError>;
    async fn update_task_date(&self, id: i64, date: CalendarDate) -> Result<u64, CoreError>;
    async fn delete_task(&self, id: i64) -> Result<u64, CoreError>;
    /// Tasks ordered by date, then id.
    async fn list_tasks(&self, limit: u32) -> Result<Vec<Task>, CoreError>;
    /// Marks a task done: deletes a one-off task or moves a recurring one to
    /// its next occurrence, atomically with the read of the row.
    async fn complete_task(&self, id: i64, now: NaiveDateTime) -> Result<CompletionResult, CoreError>;
}

/// SQLite implementation of the repository pattern
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}
