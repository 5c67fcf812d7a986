use chrono::Local;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub type DbPool = Pool<Sqlite>;

/// Open the collection read-only over a single connection.
///
/// The desktop client may hold the file open; nothing here writes to it.
pub async fn create_pool(db_path: &Path) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .read_only(true)
        .create_if_missing(false);

    SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(options)
        .await
}

pub async fn check_connection(pool: &DbPool) -> Result<bool, sqlx::Error> {
    sqlx::query("SELECT 1").fetch_one(pool).await.map(|_| true)
}

/// Copy the collection into `backup_dir` as `backup_<YYYYMMDD>.anki2`.
///
/// A second run on the same day replaces that day's backup.
pub async fn backup_store(db_path: &Path, backup_dir: &Path) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(backup_dir).await?;
    let target = backup_dir.join(format!(
        "backup_{}.anki2",
        Local::now().format("%Y%m%d")
    ));
    tokio::fs::copy(db_path, &target).await?;
    Ok(target)
}
