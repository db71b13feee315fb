//! SQLite pool opening for the storage crate.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use tracing::info;

/// Opens a pool for the given database URL (`sqlite:path.db` or
/// `sqlite::memory:`), creating the database file if missing.
pub async fn open_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    info!(database_url, "Opening SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    SqlitePool::connect_with(options).await
}
