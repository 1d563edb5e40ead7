//! Database-backed option store
//!
//! Every write is persisted before the call returns. There is no caching
//! layer: reads go to the database and `get_option_map` rebuilds its
//! snapshot on each call.

use super::entity::{OptionMap, OptionRecord};
use super::error::{OptionsError, Result};
use super::names::OptionName;
use super::types::{parse_bool, parse_int, OptionValue};
use chrono::Utc;
use sqlx::SqlitePool;

/// Option store over the `options` table
#[derive(Debug, Clone)]
pub struct OptionStore {
    pool: SqlitePool,
}

impl OptionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get the raw value, or None if the option does not exist
    pub async fn get_option_or_null(&self, name: &str) -> Result<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM options WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    /// Get the raw value of an option that is expected to exist
    pub async fn get_option(&self, name: &str) -> Result<String> {
        self.get_option_or_null(name)
            .await?
            .ok_or_else(|| OptionsError::not_found(name))
    }

    /// Get as a base-10 integer
    ///
    /// `default` only covers a malformed stored value; a missing option is
    /// still `NotFound`.
    pub async fn get_option_int(&self, name: &str, default: Option<i64>) -> Result<i64> {
        let raw = self.get_option(name).await?;
        match parse_int(name, &raw) {
            Ok(v) => Ok(v),
            Err(err) => default.ok_or(err),
        }
    }

    /// Get as a boolean; only the literals `true` and `false` are accepted
    pub async fn get_option_bool(&self, name: &str) -> Result<bool> {
        let raw = self.get_option(name).await?;
        parse_bool(name, &raw)
    }

    /// Update an existing option, or create it as local-only if absent
    pub async fn set_option(&self, name: &str, value: impl Into<OptionValue>) -> Result<()> {
        let value = value.into().encode();

        let result = sqlx::query(
            "UPDATE options SET value = ?, utc_date_modified = ? WHERE name = ?",
        )
        .bind(&value)
        .bind(Utc::now())
        .bind(name)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return self.create_option(name, &value, false).await;
        }

        log::debug!("Set option: {} = {}", name, value);
        Ok(())
    }

    /// Insert a new option
    ///
    /// Fails with `AlreadyExists` if the name is taken; the existing value is
    /// left untouched.
    pub async fn create_option(&self, name: &str, value: &str, is_synced: bool) -> Result<()> {
        let record = OptionRecord::new(name, value, is_synced);

        sqlx::query(
            "INSERT INTO options (name, value, is_synced, utc_date_modified) VALUES (?, ?, ?, ?)",
        )
        .bind(&record.name)
        .bind(&record.value)
        .bind(record.is_synced)
        .bind(record.utc_date_modified)
        .execute(&self.pool)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                OptionsError::AlreadyExists {
                    name: name.to_string(),
                }
            }
            _ => OptionsError::Persistence(err),
        })?;

        log::debug!(
            "Created option: {} = {} ({})",
            name,
            value,
            if is_synced { "synced" } else { "local" }
        );
        Ok(())
    }

    /// All live options, ordered by name
    pub async fn get_options(&self) -> Result<Vec<OptionRecord>> {
        let rows = sqlx::query_as::<_, OptionRecord>(
            "SELECT name, value, is_synced, utc_date_modified FROM options ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Options with the given sync flag, ordered by name
    pub async fn get_options_by_sync(&self, is_synced: bool) -> Result<Vec<OptionRecord>> {
        let rows = sqlx::query_as::<_, OptionRecord>(
            "SELECT name, value, is_synced, utc_date_modified FROM options WHERE is_synced = ? ORDER BY name",
        )
        .bind(is_synced)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Fresh snapshot of every option as raw strings
    pub async fn get_option_map(&self) -> Result<OptionMap> {
        let rows: Vec<(String, String)> = sqlx::query_as("SELECT name, value FROM options")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().collect())
    }

    /// Typed read of a known option
    pub async fn get(&self, name: OptionName) -> Result<OptionValue> {
        let raw = self.get_option(name.as_str()).await?;
        name.kind().parse(name.as_str(), &raw)
    }

    /// Typed write of a known option; the value must match the option's kind
    pub async fn set(&self, name: OptionName, value: OptionValue) -> Result<()> {
        let expected = name.kind();
        if !expected.matches(&value) {
            return Err(OptionsError::TypeMismatch {
                name: name.as_str().to_string(),
                expected: expected.label(),
                actual: value.kind().label(),
            });
        }
        self.set_option(name.as_str(), value).await
    }

    /// Whether the instance finished its bootstrap
    pub async fn is_initialized(&self) -> Result<bool> {
        let value = self
            .get_option_or_null(OptionName::Initialized.as_str())
            .await?;
        Ok(value.as_deref() == Some("true"))
    }
}
