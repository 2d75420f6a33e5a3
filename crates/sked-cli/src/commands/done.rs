use anyhow::Result;
use sked_core::models::CompletionResult;
use sked_core::validation::parse_task_id;

use super::Service;
use crate::cli::DoneCommand;

pub async fn done_task(service: &Service, command: DoneCommand) -> Result<()> {
    let id = parse_task_id(&command.id)?;

    match service.complete_task(id).await? {
        CompletionResult::Removed(task) => {
            println!("Completed task: '{}'", task.title);
        }
        CompletionResult::Rescheduled { task, previous } => {
            println!("Completed task: '{}' ({})", task.title, previous);
            println!("Next occurrence: {}", task.date);
        }
    }

    Ok(())
}
