use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;

use crate::error::CoreError;

pub use sqlx::SqlitePool as DbPool;

/// Opens the SQLite database at `db_path` and brings its schema up to date.
///
/// # Arguments
///
/// * `db_path` - The path to the SQLite database file. Missing parent
///   directories and the file itself are created.
///
/// # Returns
///
/// A `Result` containing the `SqlitePool` or a `CoreError` if the connection fails
/// or migrations cannot be run.
pub async fn establish_connection(db_path: impl AsRef<Path>) -> Result<SqlitePool, CoreError> {
    let db_path = db_path.as_ref();
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_creates_file_and_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("scheduler.db");

        let pool = establish_connection(&path).await.unwrap();
        assert!(path.exists());

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = 'scheduler_date'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_reopening_keeps_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scheduler.db");

        let pool = establish_connection(&path).await.unwrap();
        sqlx::query("INSERT INTO scheduler (date, title) VALUES ('20240101', 'kept')")
            .execute(&pool)
            .await
            .unwrap();
        pool.close().await;

        let pool = establish_connection(&path).await.unwrap();
        let (title,): (String,) = sqlx::query_as("SELECT title FROM scheduler")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(title, "kept");
    }
}
