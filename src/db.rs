//! SQLite database connection management.
//!
//! The pool returned by [`connect`] is the process-wide database handle: it
//! is created once at startup, handed to the store, and closed with
//! [`close`] at shutdown. Individual operations borrow a connection from it
//! and return it when they finish, on success or error.
//!
//! WAL mode is enabled so concurrent readers don't block on a writer.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::config::Config;

/// Create a connection pool to the configured SQLite database.
///
/// Creates the database file and its parent directories if missing.
pub async fn connect(config: &Config) -> Result<SqlitePool> {
    let db_path = &config.db.path;

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open database: {}", db_path.display()))?;

    tracing::debug!(path = %db_path.display(), "database pool opened");
    Ok(pool)
}

/// Close the pool, waiting for checked-out connections to be returned.
pub async fn close(pool: &SqlitePool) {
    tracing::debug!("closing database pool");
    pool.close().await;
}
