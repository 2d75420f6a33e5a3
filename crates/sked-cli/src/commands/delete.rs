use anyhow::Result;
use dialoguer::Confirm;
use sked_core::validation::parse_task_id;

use super::Service;
use crate::cli::DeleteCommand;

pub async fn delete_task(service: &Service, command: DeleteCommand) -> Result<()> {
    let id = parse_task_id(&command.id)?;
    let task = service.get_task(id).await?;

    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!("Are you sure you want to delete task '{}'?", task.title))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    service.delete_task(id).await?;
    println!("Deleted task: '{}'", task.title);
    Ok(())
}
