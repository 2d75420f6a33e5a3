use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A personal task scheduler with recurring tasks
#[derive(Parser, Debug)]
#[command(name = "sked", author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the HTTP API and web front-end
    Serve(ServeCommand),
    /// Add a new task
    Add(AddCommand),
    /// List upcoming tasks
    List(ListCommand),
    /// Show a single task
    Show(ShowCommand),
    /// Edit a task
    Edit(EditCommand),
    /// Delete a task
    Delete(DeleteCommand),
    /// Mark a task as done
    Done(DoneCommand),
    /// Compute the next occurrence of a date under a repeat rule
    Next(NextCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeCommand {
    /// Port to listen on, overriding TODO_PORT and the config file
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// Date as YYYYMMDD; today when omitted
    #[arg(short, long)]
    pub date: Option<String>,
    /// Free-form comment
    #[arg(short, long)]
    pub comment: Option<String>,
    /// Repeat rule: "y" for yearly or "d <n>" for every n days
    #[arg(short, long)]
    pub repeat: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Maximum number of tasks to show (defaults to task_limit)
    #[arg(short, long)]
    pub limit: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowCommand {
    /// The ID of the task
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the task to edit
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub comment: Option<String>,

    /// New repeat rule; pass an empty string to stop repeating
    #[arg(long)]
    pub repeat: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DoneCommand {
    /// The ID of the task to mark as done
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct NextCommand {
    /// Starting date as YYYYMMDD
    #[arg(long)]
    pub date: String,
    /// Repeat rule: "y" or "d <n>"
    #[arg(long)]
    pub repeat: String,
    /// Reference date as YYYYMMDD; today when omitted
    #[arg(long)]
    pub now: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_with_rule() {
        let cli = Cli::try_parse_from(["sked", "add", "Water plants", "--repeat", "d 3"]).unwrap();
        match cli.command {
            Commands::Add(add) => {
                assert_eq!(add.title, "Water plants");
                assert_eq!(add.repeat.as_deref(), Some("d 3"));
                assert!(add.date.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["sked", "list", "--config", "alt.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
    }

    #[test]
    fn test_next_requires_date_and_repeat() {
        assert!(Cli::try_parse_from(["sked", "next", "--date", "20240101"]).is_err());
    }
}
