use anyhow::Result;
use sked_core::clock::Clock;

use super::Service;
use crate::cli::ListCommand;
use crate::config::Config;
use crate::views::table::display_tasks;

pub async fn list_tasks(service: &Service, command: ListCommand, config: &Config) -> Result<()> {
    let limit = command.limit.unwrap_or(config.task_limit);
    let tasks = service.list_tasks(limit).await?;
    display_tasks(&tasks, service.clock().today());
    Ok(())
}
