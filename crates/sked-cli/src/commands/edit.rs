use anyhow::{bail, Result};
use owo_colors::OwoColorize;
use sked_core::models::UpdateTaskData;
use sked_core::validation::parse_task_id;

use super::Service;
use crate::cli::EditCommand;

pub async fn edit_task(service: &Service, command: EditCommand) -> Result<()> {
    let id = parse_task_id(&command.id)?;

    if command.title.is_none()
        && command.date.is_none()
        && command.comment.is_none()
        && command.repeat.is_none()
    {
        bail!("nothing to change: pass at least one of --title, --date, --comment, --repeat");
    }

    let current = service.get_task(id).await?;
    let mut data = UpdateTaskData::from_task(&current);
    if let Some(title) = command.title {
        data.title = title;
    }
    if let Some(date) = command.date {
        data.date = date;
    }
    if let Some(comment) = command.comment {
        data.comment = comment;
    }
    if let Some(repeat) = command.repeat {
        data.repeat = repeat;
    }

    let updated = service.update_task(&data).await?;
    println!(
        "{} Updated task {}: {} on {}",
        "✓".green().bold(),
        updated.id.to_string().yellow(),
        updated.title.bright_white().bold(),
        updated.date
    );
    if updated.date != current.date {
        println!("  {} date moved from {}", "→".blue(), current.date);
    }

    Ok(())
}
