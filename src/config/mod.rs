//! SQLite-based configuration module
//!
//! This module provides:
//! - Data directory and database path resolution
//! - Optional `config.toml` with sync endpoint settings
//! - Environment overrides consumed by startup defaulting
//! - The option store and its defaulting procedures

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod db;
pub mod migrations;
pub mod options;

use options::{NotSyncedOptions, OptionStore, StartupOverrides};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "NOTES_DATA_DIR";

const APP_DIR_NAME: &str = "note-options";
const DB_FILE_NAME: &str = "options.db";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    pub server_host: Option<String>,
    pub proxy: Option<String>,
}

impl From<&SyncConfig> for NotSyncedOptions {
    fn from(sync: &SyncConfig) -> Self {
        Self {
            sync_server_host: sync.server_host.clone(),
            sync_proxy: sync.proxy.clone(),
        }
    }
}

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub file: FileConfig,
    pub overrides: StartupOverrides,
    /// The data directory did not exist and was created by this load
    pub created_data_dir: bool,
}

impl AppConfig {
    /// Load from the environment and the data directory
    pub fn load() -> Result<Self> {
        let data_dir = Self::resolve_data_dir()?;
        Self::load_from(data_dir, StartupOverrides::from_env())
    }

    /// Load using an explicit data directory
    pub fn load_from(data_dir: PathBuf, overrides: StartupOverrides) -> Result<Self> {
        let created_data_dir = !data_dir.exists();
        if created_data_dir {
            std::fs::create_dir_all(&data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;
        }

        let file = Self::read_file_config(&data_dir.join(CONFIG_FILE_NAME))?;

        Ok(Self {
            data_dir,
            file,
            overrides,
            created_data_dir,
        })
    }

    fn resolve_data_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }

        let data_dir = if cfg!(target_os = "linux") {
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join(APP_DIR_NAME)
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(format!(".{}", APP_DIR_NAME))
        };
        Ok(data_dir)
    }

    fn read_file_config(path: &Path) -> Result<FileConfig> {
        if !path.exists() {
            log::debug!("No config file at {:?}, using defaults", path);
            return Ok(FileConfig::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.log", APP_DIR_NAME))
    }

    pub fn not_synced_options(&self) -> NotSyncedOptions {
        NotSyncedOptions::from(&self.file.sync)
    }
}

/// Connect, migrate and wrap the database in an option store
pub async fn open_store(db_path: &Path) -> Result<OptionStore> {
    let pool = db::connect(db_path).await?;
    db::run_migrations(&pool).await?;
    Ok(OptionStore::new(pool))
}

/// In-memory store with the schema applied, for tests
pub async fn open_memory_store() -> Result<OptionStore> {
    let pool = db::connect_memory().await?;
    db::run_migrations(&pool).await?;
    Ok(OptionStore::new(pool))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(dir.path().to_path_buf(), StartupOverrides::default()).unwrap();

        assert!(!config.created_data_dir);
        assert_eq!(config.file, FileConfig::default());
        assert_eq!(config.db_path(), dir.path().join("options.db"));
        assert_eq!(config.not_synced_options(), NotSyncedOptions::default());
    }

    #[test]
    fn test_sync_section_is_read() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "[sync]\nserver_host = \"https://sync.example.com\"\nproxy = \"http://proxy:3128\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path().to_path_buf(), StartupOverrides::default()).unwrap();
        let opts = config.not_synced_options();
        assert_eq!(opts.sync_server_host.as_deref(), Some("https://sync.example.com"));
        assert_eq!(opts.sync_proxy.as_deref(), Some("http://proxy:3128"));
    }

    #[test]
    fn test_invalid_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "[sync\n").unwrap();

        assert!(AppConfig::load_from(dir.path().to_path_buf(), StartupOverrides::default()).is_err());
    }

    #[test]
    fn test_creates_missing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let config = AppConfig::load_from(nested.clone(), StartupOverrides::default()).unwrap();
        assert!(nested.is_dir());
        assert!(config.created_data_dir);

        let again = AppConfig::load_from(nested, StartupOverrides::default()).unwrap();
        assert!(!again.created_data_dir);
    }
}
