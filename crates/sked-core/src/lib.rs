//! # Sked Core Library
//!
//! Personal task scheduling: tasks carry an optional recurrence rule, and the
//! library decides which calendar day each task lands on next.
//!
//! ## Core Modules
//!
//! - [`date`]: `YYYYMMDD` calendar dates
//! - [`rule`]: recurrence rules (`y`, `d <n>`)
//! - [`recurrence`]: next-occurrence engine
//! - [`validation`]: date normalization and write payload checks
//! - [`completion`]: what marking a task done does
//! - [`clock`]: injectable source of "now"
//! - [`models`]: task rows and transfer objects
//! - [`db`]: database connection and migration management
//! - [`repository`]: data access layer with Repository pattern
//! - [`service`]: validated task operations over a repository
//! - [`error`]: error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use sked_core::{db, models::NewTaskData, repository::SqliteRepository, service::TaskService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sked_core::error::CoreError> {
//!     let pool = db::establish_connection("scheduler.db").await?;
//!     let service = TaskService::new(SqliteRepository::new(pool));
//!
//!     let id = service
//!         .add_task(&NewTaskData {
//!             title: "Water plants".to_string(),
//!             repeat: "d 3".to_string(),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("Created task {}", id);
//!
//!     Ok(())
//! }
//! ```

pub mod clock;
pub mod completion;
pub mod date;
pub mod db;
pub mod error;
pub mod models;
pub mod recurrence;
pub mod repository;
pub mod rule;
pub mod service;
pub mod validation;
