use anyhow::Result;
use sked_core::clock::Clock;
use sked_core::validation::parse_task_id;

use super::Service;
use crate::cli::ShowCommand;
use crate::views::table::display_task;

pub async fn show_task(service: &Service, command: ShowCommand) -> Result<()> {
    let id = parse_task_id(&command.id)?;
    let task = service.get_task(id).await?;
    display_task(&task, service.clock().today());
    Ok(())
}
