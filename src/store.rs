//! SQLite handle for a table: database directory creation and pool setup.

use crate::config::StorageLocation;
use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Open the one shared connection for a store. The connection lives for the pool's lifetime
/// (no idle timeout, no max lifetime), which also keeps an in-memory database alive.
pub async fn open_pool(location: &StorageLocation) -> Result<SqlitePool, AppError> {
    let options = match location {
        StorageLocation::File(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(dir).await?;
            }
            tracing::info!(path = %path.display(), "opening sqlite database");
            SqliteConnectOptions::new().filename(path).create_if_missing(true)
        }
        StorageLocation::Memory => {
            tracing::debug!("opening in-memory sqlite database");
            SqliteConnectOptions::from_str("sqlite::memory:")?
        }
    };
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// `SELECT 1` on the pool; the readiness route calls it.
pub async fn ping(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query("SELECT 1").fetch_optional(pool).await?;
    Ok(())
}
