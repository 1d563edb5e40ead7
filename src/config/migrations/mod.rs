//! Versioned schema migrations for the option database
//!
//! Migrations are forward-only and only ever add structure; option rows must
//! survive every one of them. Each migration is a single embedded
//! `files/NNN_name.sql` script.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use std::collections::{BTreeMap, HashSet};

pub mod manager;

pub use manager::{MigrationManager, MigrationStatus};

/// One embedded schema script
#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub name: String,
    pub sql: String,
}

impl Migration {
    pub fn checksum(&self) -> String {
        calculate_checksum(&self.sql)
    }
}

/// Row of `schema_migrations`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AppliedMigration {
    pub version: i64,
    pub name: String,
    pub applied_at: chrono::DateTime<chrono::Utc>,
    pub checksum: String,
}

/// Parse `NNN_name.sql` into its version and name
fn parse_file_name(file_name: &str) -> Result<(i64, String)> {
    let stem = file_name
        .strip_suffix(".sql")
        .with_context(|| format!("Migration file {} is not a .sql file", file_name))?;

    let (version, name) = stem.split_once('_').with_context(|| {
        format!("Invalid migration file name: {}. Expected format: NNN_name.sql", file_name)
    })?;

    let version: i64 = version
        .parse()
        .with_context(|| format!("Invalid migration version in file name: {}", file_name))?;

    Ok((version, name.to_string()))
}

/// All migrations embedded from the files/ directory, keyed by version
pub fn load_migrations() -> Result<BTreeMap<i64, Migration>> {
    use include_dir::{include_dir, Dir};

    static MIGRATIONS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/config/migrations/files");

    let mut migrations = BTreeMap::new();

    for file in MIGRATIONS_DIR.files() {
        let file_name = file
            .path()
            .file_name()
            .and_then(|n| n.to_str())
            .context("Invalid migration file name")?;

        let (version, name) = parse_file_name(file_name)?;
        let sql = file
            .contents_utf8()
            .with_context(|| format!("Migration {} is not valid UTF-8", file_name))?
            .to_string();

        if migrations.insert(version, Migration { version, name, sql }).is_some() {
            anyhow::bail!("Duplicate migration version {}", version);
        }
    }

    if migrations.is_empty() {
        anyhow::bail!("No migrations found in files directory");
    }

    Ok(migrations)
}

/// Create the migration tracking table
pub async fn init_migration_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            checksum TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create schema_migrations table")?;

    Ok(())
}

pub async fn get_applied_migrations(pool: &SqlitePool) -> Result<Vec<AppliedMigration>> {
    sqlx::query_as::<_, AppliedMigration>(
        "SELECT version, name, applied_at, checksum FROM schema_migrations ORDER BY version",
    )
    .fetch_all(pool)
    .await
    .context("Failed to get applied migrations")
}

/// Hex SHA-256 of the migration script
pub fn calculate_checksum(sql: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(sql.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Every applied migration must still ship with the same script
pub async fn validate_migrations(pool: &SqlitePool) -> Result<()> {
    let available = load_migrations()?;

    for applied in get_applied_migrations(pool).await? {
        let Some(migration) = available.get(&applied.version) else {
            anyhow::bail!(
                "Database has migration {} '{}' which this build does not know about",
                applied.version,
                applied.name
            );
        };

        let expected = migration.checksum();
        if applied.checksum != expected {
            anyhow::bail!(
                "Migration {} '{}' was modified after being applied (recorded {}, embedded {})",
                applied.version,
                applied.name,
                applied.checksum,
                expected
            );
        }
    }

    Ok(())
}

/// Migrations embedded in this build but not yet applied, in version order
pub async fn get_pending_migrations(pool: &SqlitePool) -> Result<Vec<Migration>> {
    let applied: HashSet<i64> = get_applied_migrations(pool)
        .await?
        .into_iter()
        .map(|m| m.version)
        .collect();

    Ok(load_migrations()?
        .into_values()
        .filter(|m| !applied.contains(&m.version))
        .collect())
}

/// Highest applied version, None on a fresh database
pub async fn get_current_version(pool: &SqlitePool) -> Result<Option<i64>> {
    sqlx::query_scalar::<_, Option<i64>>("SELECT MAX(version) FROM schema_migrations")
        .fetch_one(pool)
        .await
        .context("Failed to get current schema version")
}
