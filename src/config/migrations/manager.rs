//! Applies pending schema migrations and reports schema status

use anyhow::{Context, Result};
use log::{debug, info};
use sqlx::SqlitePool;

use super::{
    get_applied_migrations, get_current_version, get_pending_migrations, init_migration_table,
    load_migrations, validate_migrations, AppliedMigration, Migration,
};

/// Brings an option database up to the schema embedded in this build
pub struct MigrationManager<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MigrationManager<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply every pending migration in version order
    ///
    /// Refuses to touch a database whose applied scripts no longer match the
    /// embedded ones.
    pub async fn migrate(&self) -> Result<usize> {
        init_migration_table(self.pool).await?;
        validate_migrations(self.pool).await?;

        let pending = get_pending_migrations(self.pool).await?;
        if pending.is_empty() {
            debug!("Option schema is up to date");
            return Ok(0);
        }

        info!("Applying {} schema migrations", pending.len());
        for migration in &pending {
            self.apply(migration).await?;
        }
        Ok(pending.len())
    }

    /// Run one script and record it, atomically
    async fn apply(&self, migration: &Migration) -> Result<()> {
        info!("Applying migration {} '{}'", migration.version, migration.name);
        debug!("Executing SQL:\n{}", migration.sql);

        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to start migration transaction")?;

        sqlx::query(&migration.sql)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Migration {} '{}' failed", migration.version, migration.name))?;

        sqlx::query("INSERT INTO schema_migrations (version, name, checksum) VALUES (?, ?, ?)")
            .bind(migration.version)
            .bind(&migration.name)
            .bind(migration.checksum())
            .execute(&mut *tx)
            .await
            .context("Failed to record migration")?;

        tx.commit()
            .await
            .context("Failed to commit migration transaction")
    }

    pub async fn status(&self) -> Result<MigrationStatus> {
        init_migration_table(self.pool).await?;

        Ok(MigrationStatus {
            current_version: get_current_version(self.pool).await?,
            total_available: load_migrations()?.len(),
            applied: get_applied_migrations(self.pool).await?,
            pending: get_pending_migrations(self.pool).await?,
        })
    }
}

/// Snapshot of applied and pending migrations
#[derive(Debug)]
pub struct MigrationStatus {
    pub current_version: Option<i64>,
    pub total_available: usize,
    pub applied: Vec<AppliedMigration>,
    pub pending: Vec<Migration>,
}

impl MigrationStatus {
    pub fn is_up_to_date(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn print_status(&self) {
        let version = self
            .current_version
            .map(|v| v.to_string())
            .unwrap_or_else(|| "none".to_string());

        println!("Schema:");
        println!("  Version: {} ({} of {} applied)", version, self.applied.len(), self.total_available);
        println!("  Up to date: {}", if self.is_up_to_date() { "yes" } else { "no" });

        for migration in &self.applied {
            println!(
                "  ✓ {:03} {} ({})",
                migration.version,
                migration.name,
                migration.applied_at.format("%Y-%m-%d %H:%M:%S")
            );
        }
        for migration in &self.pending {
            println!("  ○ {:03} {}", migration.version, migration.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::db;
    use crate::config::migrations::calculate_checksum;

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let pool = db::connect_memory().await.unwrap();
        let manager = MigrationManager::new(&pool);

        let first = manager.migrate().await.unwrap();
        let second = manager.migrate().await.unwrap();

        assert_eq!(first, load_migrations().unwrap().len());
        assert_eq!(second, 0);
        let status = manager.status().await.unwrap();
        assert!(status.is_up_to_date());
        assert_eq!(status.applied.len(), status.total_available);
    }

    #[tokio::test]
    async fn test_migrations_keep_option_rows() {
        let pool = db::connect_memory().await.unwrap();
        let manager = MigrationManager::new(&pool);

        // Apply only the table, insert a row, then apply the rest
        init_migration_table(&pool).await.unwrap();
        let first = load_migrations().unwrap().remove(&1).unwrap();
        manager.apply(&first).await.unwrap();
        sqlx::query(
            "INSERT INTO options (name, value, is_synced, utc_date_modified) VALUES ('theme', 'light', 0, '2024-01-01T00:00:00Z')",
        )
        .execute(&pool)
        .await
        .unwrap();

        assert_eq!(manager.migrate().await.unwrap(), 1);

        let value: String = sqlx::query_scalar("SELECT value FROM options WHERE name = 'theme'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(value, "light");
    }

    #[tokio::test]
    async fn test_recorded_checksum_is_sha256_of_script() {
        let pool = db::connect_memory().await.unwrap();
        MigrationManager::new(&pool).migrate().await.unwrap();

        let recorded: String =
            sqlx::query_scalar("SELECT checksum FROM schema_migrations WHERE version = 1")
                .fetch_one(&pool)
                .await
                .unwrap();
        let script = &load_migrations().unwrap()[&1].sql;
        assert_eq!(recorded, calculate_checksum(script));
        assert_eq!(recorded.len(), 64);
    }

    #[tokio::test]
    async fn test_modified_script_is_rejected() {
        let pool = db::connect_memory().await.unwrap();
        let manager = MigrationManager::new(&pool);
        manager.migrate().await.unwrap();

        sqlx::query("UPDATE schema_migrations SET checksum = 'deadbeef' WHERE version = 2")
            .execute(&pool)
            .await
            .unwrap();

        let err = manager.migrate().await.unwrap_err();
        assert!(err.to_string().contains("modified after being applied"));
    }

    #[tokio::test]
    async fn test_unknown_applied_version_is_rejected() {
        let pool = db::connect_memory().await.unwrap();
        let manager = MigrationManager::new(&pool);
        manager.migrate().await.unwrap();

        sqlx::query("INSERT INTO schema_migrations (version, name, checksum) VALUES (999, 'future', 'x')")
            .execute(&pool)
            .await
            .unwrap();

        assert!(manager.migrate().await.is_err());
    }
}
