//! Orchestration of task writes: validate against the clock, then persist.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::date::CalendarDate;
use crate::error::CoreError;
use crate::models::{CompletionResult, NewTaskData, Task, UpdateTaskData};
use crate::recurrence::next_date;
use crate::repository::TaskRepository;
use crate::validation::{validate_new_task, validate_task_update};

/// Front door for every task operation, shared by the HTTP API and the CLI.
///
/// Cloning is cheap: the repository and clock sit behind `Arc`s.
#[derive(Debug)]
pub struct TaskService<R, C = SystemClock> {
    repo: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskService<R, C> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R: TaskRepository> TaskService<R, SystemClock> {
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: TaskRepository, C: Clock> TaskService<R, C> {
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self {
            repo: Arc::new(repo),
            clock: Arc::new(clock),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Validates and stores a new task, returning its id.
    pub async fn add_task(&self, data: &NewTaskData) -> Result<i64, CoreError> {
        let task = validate_new_task(self.clock.now(), data).map_err(reject)?;
        let id = self.repo.create_task(&task).await?;
        debug!(id, date = %task.date, repeat = %task.repeat, "task added");
        Ok(id)
    }

    pub async fn get_task(&self, id: i64) -> Result<Task, CoreError> {
        self.repo
            .get_task(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }

    /// Replaces every editable field of an existing task.
    pub async fn update_task(&self, data: &UpdateTaskData) -> Result<Task, CoreError> {
        let task = validate_task_update(self.clock.now(), data).map_err(reject)?;
        if self.repo.update_task(&task).await? == 0 {
            return Err(CoreError::NotFound(task.id.to_string()));
        }
        debug!(id = task.id, date = %task.date, "task updated");
        Ok(task)
    }

    pub async fn delete_task(&self, id: i64) -> Result<(), CoreError> {
        if self.repo.delete_task(id).await? == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }
        debug!(id, "task deleted");
        Ok(())
    }

    pub async fn list_tasks(&self, limit: u32) -> Result<Vec<Task>, CoreError> {
        self.repo.list_tasks(limit).await
    }

    pub async fn complete_task(&self, id: i64) -> Result<CompletionResult, CoreError> {
        let result = self.repo.complete_task(id, self.clock.now()).await?;
        match &result {
            CompletionResult::Removed(task) => debug!(id = task.id, "one-off task done"),
            CompletionResult::Rescheduled { task, previous } => {
                debug!(id = task.id, %previous, next = %task.date, "recurring task done")
            }
        }
        Ok(result)
    }

    /// Next occurrence of `date` under `repeat`, relative to `now` or the
    /// service clock when `now` is not given.
    pub fn next_date(
        &self,
        now: Option<CalendarDate>,
        date: &str,
        repeat: &str,
    ) -> Result<CalendarDate, CoreError> {
        let now = now.map_or_else(|| self.clock.now(), |date| date.at_midnight());
        Ok(next_date(now, date, repeat)?)
    }
}

fn reject(err: CoreError) -> CoreError {
    warn!(error = %err, "task rejected");
    err
}
