use sked_core::repository::SqliteRepository;
use sked_core::service::TaskService;

pub mod add;
pub mod delete;
pub mod done;
pub mod edit;
pub mod list;
pub mod next;
pub mod serve;
pub mod show;

/// The service every database-backed command runs against.
pub type Service = TaskService<SqliteRepository>;
