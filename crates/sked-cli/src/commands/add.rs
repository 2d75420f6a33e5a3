use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use sked_core::models::NewTaskData;

use super::Service;
use crate::cli::AddCommand;
use crate::views::table::describe_rule;

pub async fn add_task(service: &Service, command: AddCommand) -> Result<()> {
    let data = NewTaskData {
        date: command.date.unwrap_or_default(),
        title: command.title,
        comment: command.comment.unwrap_or_default(),
        repeat: command.repeat.unwrap_or_default(),
    };

    let id = service.add_task(&data).await?;
    let task = service.get_task(id).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();

    println!(
        "{} Created task: {}",
        "✓".style(success_style),
        task.title.bright_white().bold()
    );
    println!("  {} Task ID: {}", "→".style(info_style), task.id.to_string().yellow());
    println!("  {} Date: {}", "→".style(info_style), task.date);
    if task.repeat.is_recurring() {
        println!("  {} Repeats: {}", "→".style(info_style), describe_rule(task.repeat));
    }

    Ok(())
}
