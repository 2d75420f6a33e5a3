use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::SqliteConnection;
use tracing::{debug, error};

use crate::completion::{complete, Completion};
use crate::date::CalendarDate;
use crate::error::CoreError;
use crate::models::{CompletionResult, NewTask, Task};
use crate::repository::SqliteRepository;

const SELECT_TASK: &str = "SELECT id, date, title, comment, repeat FROM scheduler";

#[async_trait]
impl super::TaskRepository for SqliteRepository {
    async fn create_task(&self, task: &NewTask) -> Result<i64, CoreError> {
        let result = sqlx::query(
            "INSERT INTO scheduler (date, title, comment, repeat) VALUES ($1, $2, $3, $4)",
        )
        .bind(task.date.to_string())
        .bind(&task.title)
        .bind(&task.comment)
        .bind(task.repeat.to_string())
        .execute(self.pool())
        .await
        .map_err(log_storage_error)?;

        let id = result.last_insert_rowid();
        debug!(id, date = %task.date, "inserted task");
        Ok(id)
    }

    async fn get_task(&self, id: i64) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_TASK))
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(log_storage_error)?;
        Ok(task)
    }

    async fn update_task(&self, task: &Task) -> Result<u64, CoreError> {
        let result = sqlx::query(
            r#"UPDATE scheduler
            SET date = $1, title = $2, comment = $3, repeat = $4
            WHERE id = $5"#,
        )
        .bind(task.date.to_string())
        .bind(&task.title)
        .bind(&task.comment)
        .bind(task.repeat.to_string())
        .bind(task.id)
        .execute(self.pool())
        .await
        .map_err(log_storage_error)?;

        debug!(id = task.id, rows = result.rows_affected(), "updated task");
        Ok(result.rows_affected())
    }

    async fn update_task_date(&self, id: i64, date: CalendarDate) -> Result<u64, CoreError> {
        let result = sqlx::query("UPDATE scheduler SET date = $1 WHERE id = $2")
            .bind(date.to_string())
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(log_storage_error)?;

        debug!(id, %date, rows = result.rows_affected(), "moved task");
        Ok(result.rows_affected())
    }

    async fn delete_task(&self, id: i64) -> Result<u64, CoreError> {
        let result = sqlx::query("DELETE FROM scheduler WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(log_storage_error)?;

        debug!(id, rows = result.rows_affected(), "deleted task");
        Ok(result.rows_affected())
    }

    async fn list_tasks(&self, limit: u32) -> Result<Vec<Task>, CoreError> {
        let tasks = sqlx::query_as(&format!("{} ORDER BY date ASC, id ASC LIMIT $1", SELECT_TASK))
            .bind(i64::from(limit))
            .fetch_all(self.pool())
            .await
            .map_err(log_storage_error)?;
        Ok(tasks)
    }

    async fn complete_task(&self, id: i64, now: NaiveDateTime) -> Result<CompletionResult, CoreError> {
        // Detached, so a completion dropped mid-transaction closes its
        // connection (rolling back) instead of handing it back to the pool.
        let mut conn = self.pool().acquire().await?.detach();

        // The write lock is taken before the read; a racing completion
        // waits here until this one commits.
        sqlx::query("BEGIN IMMEDIATE").execute(&mut conn).await?;

        match complete_locked(&mut conn, id, now).await {
            Ok(result) => {
                sqlx::query("COMMIT").execute(&mut conn).await?;
                debug!(id, "completed task");
                Ok(result)
            }
            Err(err) => {
                if let Err(rollback) = sqlx::query("ROLLBACK").execute(&mut conn).await {
                    error!(error = %rollback, id, "task completion rollback failed");
                }
                Err(err)
            }
        }
    }
}

async fn complete_locked(
    conn: &mut SqliteConnection,
    id: i64,
    now: NaiveDateTime,
) -> Result<CompletionResult, CoreError> {
    let task: Task = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_TASK))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

    let result = match complete(now, task.date, task.repeat)? {
        Completion::Delete => {
            sqlx::query("DELETE FROM scheduler WHERE id = $1")
                .bind(id)
                .execute(&mut *conn)
                .await?;
            CompletionResult::Removed(task)
        }
        Completion::Reschedule(next) => {
            sqlx::query("UPDATE scheduler SET date = $1 WHERE id = $2")
                .bind(next.to_string())
                .bind(id)
                .execute(&mut *conn)
                .await?;
            let previous = task.date;
            CompletionResult::Rescheduled {
                task: Task { date: next, ..task },
                previous,
            }
        }
    };
    Ok(result)
}

fn log_storage_error(err: sqlx::Error) -> CoreError {
    error!(error = %err, "task storage query failed");
    CoreError::Database(err)
}
