use clap::Parser;
use owo_colors::{OwoColorize, Style};
use sked_core::clock::SystemClock;
use sked_core::db;
use sked_core::error::{CoreError, ScheduleError};
use sked_core::repository::SqliteRepository;
use sked_core::service::TaskService;

mod cli;
mod commands;
mod config;
mod logging;
mod server;
mod views;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    if let Err(e) = run(cli).await {
        handle_error(e);
        std::process::exit(1);
    }
}

async fn run(cli: cli::Cli) -> anyhow::Result<()> {
    let config = config::Config::load(cli.config.as_deref())?;
    logging::init(&config.log_level)?;

    // Pure date arithmetic, no storage needed.
    if let cli::Commands::Next(command) = cli.command {
        return commands::next::next(command, &SystemClock);
    }

    let pool = db::establish_connection(&config.dbfile).await?;
    let service = TaskService::new(SqliteRepository::new(pool));

    match cli.command {
        cli::Commands::Serve(command) => commands::serve::serve(service, command, &config).await,
        cli::Commands::Add(command) => commands::add::add_task(&service, command).await,
        cli::Commands::List(command) => {
            commands::list::list_tasks(&service, command, &config).await
        }
        cli::Commands::Show(command) => commands::show::show_task(&service, command).await,
        cli::Commands::Edit(command) => commands::edit::edit_task(&service, command).await,
        cli::Commands::Delete(command) => commands::delete::delete_task(&service, command).await,
        cli::Commands::Done(command) => commands::done::done_task(&service, command).await,
        cli::Commands::Next(command) => commands::next::next(command, &SystemClock),
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(id) => {
                eprintln!("{} Task with ID '{}' not found.", "Error:".style(error_style), id);
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::Schedule(e) => print_schedule_error(e, error_style),
            _ => eprintln!("{} {:#}", "Error:".style(error_style), err),
        }
    } else if let Some(schedule_error) = err.downcast_ref::<ScheduleError>() {
        print_schedule_error(schedule_error, error_style);
    } else {
        eprintln!("{} {:#}", "Error:".style(error_style), err);
    }
}

fn print_schedule_error(err: &ScheduleError, error_style: Style) {
    eprintln!("{} {}", "Error:".style(error_style), err);
    if matches!(
        err,
        ScheduleError::UnsupportedRule(_)
            | ScheduleError::RuleOutOfRange(_)
            | ScheduleError::InvalidRecurrenceRule(_)
    ) {
        eprintln!(
            "  {} repeat rules are \"y\" (yearly) or \"d <n>\" with n from 1 to 400",
            "hint:".yellow()
        );
    }
}
