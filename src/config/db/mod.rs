//! Database connection and schema management

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;

/// Connect to SQLite database with proper configuration
pub async fn connect(db_path: &Path) -> Result<SqlitePool> {
    let database_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let pool = SqlitePool::connect(&database_url)
        .await
        .with_context(|| format!("Failed to connect to database: {}", db_path.display()))?;

    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await
        .context("Failed to enable WAL mode")?;

    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&pool)
        .await
        .context("Failed to set synchronous mode")?;

    sqlx::query("PRAGMA temp_store = MEMORY")
        .execute(&pool)
        .await
        .context("Failed to set temp store")?;

    log::debug!("Connected to SQLite database: {}", db_path.display());
    Ok(pool)
}

/// Connect to in-memory database for testing
///
/// Each SQLite connection gets its own in-memory database, so the pool is
/// pinned to a single connection that is never recycled.
pub async fn connect_memory() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .context("Failed to connect to in-memory database")?;

    log::debug!("Connected to in-memory SQLite database");
    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    log::debug!("Running database migrations");

    let applied = crate::config::migrations::MigrationManager::new(pool)
        .migrate()
        .await?;
    if applied > 0 {
        log::info!("Option schema migrated ({} scripts applied)", applied);
    }

    Ok(())
}

/// Get database info for debugging
pub async fn get_db_info(pool: &SqlitePool) -> Result<DatabaseInfo> {
    let version: String = sqlx::query_scalar("SELECT sqlite_version()")
        .fetch_one(pool)
        .await
        .context("Failed to get SQLite version")?;

    let schema_version = crate::config::migrations::get_current_version(pool)
        .await?
        .unwrap_or(0);

    let option_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM options")
        .fetch_one(pool)
        .await
        .context("Failed to count options")?;

    let synced_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM options WHERE is_synced = 1")
        .fetch_one(pool)
        .await
        .context("Failed to count synced options")?;

    let journal_mode: String = sqlx::query_scalar("PRAGMA journal_mode")
        .fetch_one(pool)
        .await
        .context("Failed to get journal mode")?;

    Ok(DatabaseInfo {
        sqlite_version: version,
        schema_version,
        option_count,
        synced_count,
        journal_mode,
    })
}

#[derive(Debug)]
pub struct DatabaseInfo {
    pub sqlite_version: String,
    pub schema_version: i64,
    pub option_count: i64,
    pub synced_count: i64,
    pub journal_mode: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_db_info_after_migrations() {
        let pool = connect_memory().await.unwrap();
        run_migrations(&pool).await.unwrap();

        let info = get_db_info(&pool).await.unwrap();
        assert!(info.schema_version >= 1);
        assert_eq!(info.option_count, 0);
        assert_eq!(info.synced_count, 0);
    }
}
