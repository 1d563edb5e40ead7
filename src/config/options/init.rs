//! Startup defaulting and one-time instance bootstrap

use super::defaults::{default_options, DefaultOption};
use super::error::Result;
use super::keyboard::{keyboard_default_options, KeyboardActionSource};
use super::names::OptionName;
use super::store::OptionStore;
use chrono::Utc;
use rand::{distr::Alphanumeric, Rng};
use serde::Serialize;
use std::collections::HashSet;

/// Environment variable selecting the note opened on startup
pub const START_NOTE_ID_ENV: &str = "NOTES_START_NOTE_ID";
/// Environment variable enabling safe mode (opens only the root note)
pub const SAFE_MODE_ENV: &str = "NOTES_SAFE_MODE";

const ROOT_NOTE_PATH: &str = "root";
const DOCUMENT_TOKEN_LENGTH: usize = 16;

/// Inputs from the environment that may replace `openNoteContexts` after defaulting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupOverrides {
    pub start_note_id: Option<String>,
    pub safe_mode: bool,
}

impl StartupOverrides {
    pub fn from_env() -> Self {
        let start_note_id = std::env::var(START_NOTE_ID_ENV)
            .ok()
            .filter(|id| !id.trim().is_empty());
        let safe_mode = std::env::var(SAFE_MODE_ENV)
            .map(|v| is_truthy_flag(&v))
            .unwrap_or(false);

        Self {
            start_note_id,
            safe_mode,
        }
    }

    fn is_active(&self) -> bool {
        self.start_note_id.is_some() || self.safe_mode
    }
}

fn is_truthy_flag(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false")
}

/// Sync settings written by the bootstrap
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotSyncedOptions {
    pub sync_server_host: Option<String>,
    pub sync_proxy: Option<String>,
}

/// Outcome of a startup defaulting run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupReport {
    /// Options created by this run, in table order
    pub created: Vec<String>,
    pub open_note_contexts_overridden: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NoteContext<'a> {
    note_path: &'a str,
    active: bool,
}

fn open_note_contexts(note_path: &str) -> Result<String> {
    Ok(serde_json::to_string(&[NoteContext {
        note_path,
        active: true,
    }])?)
}

/// Create every default whose name is missing; existing options are never touched
///
/// Safe to run on every start. Persistence failures abort the run.
pub async fn init_startup_options(
    store: &OptionStore,
    actions: &dyn KeyboardActionSource,
    overrides: &StartupOverrides,
) -> Result<StartupReport> {
    let options = store.get_option_map().await?;

    let mut all_defaults: Vec<DefaultOption> = default_options();
    all_defaults.extend(keyboard_default_options(actions)?);

    let mut report = StartupReport::default();
    let mut seen = HashSet::new();

    for default in &all_defaults {
        if !seen.insert(default.name.as_str()) {
            log::warn!("Skipping duplicate default for option \"{}\"", default.name);
            continue;
        }
        if options.contains(&default.name) {
            continue;
        }

        let value = default.value.resolve(&options);
        store
            .create_option(&default.name, &value, default.is_synced)
            .await?;
        log::info!("Created option \"{}\" with default value \"{}\"", default.name, value);
        report.created.push(default.name.clone());
    }

    if overrides.is_active() {
        let note_path = overrides.start_note_id.as_deref().unwrap_or(ROOT_NOTE_PATH);
        log::warn!("Overriding open note contexts with '{}'", note_path);
        store
            .set_option(
                OptionName::OpenNoteContexts.as_str(),
                open_note_contexts(note_path)?,
            )
            .await?;
        report.open_note_contexts_overridden = true;
    }

    log::debug!(
        "Startup defaulting created {} of {} default options",
        report.created.len(),
        all_defaults.len()
    );
    Ok(report)
}

fn random_secure_token(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

fn utc_now_date_time() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S%.3fZ").to_string()
}

/// Create the instance identity options; only valid on a fresh store
pub async fn init_document_options(store: &OptionStore) -> Result<()> {
    store
        .create_option(
            OptionName::DocumentId.as_str(),
            &random_secure_token(DOCUMENT_TOKEN_LENGTH),
            false,
        )
        .await?;
    store
        .create_option(
            OptionName::DocumentSecret.as_str(),
            &random_secure_token(DOCUMENT_TOKEN_LENGTH),
            false,
        )
        .await?;
    Ok(())
}

/// Create the device-local options; only valid on a fresh store
pub async fn init_not_synced_options(
    store: &OptionStore,
    initialized: bool,
    opts: &NotSyncedOptions,
) -> Result<()> {
    let now = utc_now_date_time();
    let initial = [
        (OptionName::OpenNoteContexts, open_note_contexts(ROOT_NOTE_PATH)?),
        (OptionName::LastDailyBackupDate, now.clone()),
        (OptionName::LastWeeklyBackupDate, now.clone()),
        (OptionName::LastMonthlyBackupDate, now),
        (OptionName::Theme, "dark".to_string()),
        (
            OptionName::SyncServerHost,
            opts.sync_server_host.clone().unwrap_or_default(),
        ),
        (OptionName::SyncServerTimeout, "120000".to_string()),
        (OptionName::SyncProxy, opts.sync_proxy.clone().unwrap_or_default()),
        (OptionName::Initialized, initialized.to_string()),
        (OptionName::LastSyncedPull, "0".to_string()),
        (OptionName::LastSyncedPush, "0".to_string()),
    ];

    for (name, value) in &initial {
        store.create_option(name.as_str(), value, false).await?;
    }

    Ok(())
}

/// Bootstrap a brand-new standalone instance
pub async fn bootstrap_new_instance(
    store: &OptionStore,
    actions: &dyn KeyboardActionSource,
) -> Result<StartupReport> {
    log::info!("Bootstrapping options for a new instance");
    init_document_options(store).await?;
    init_not_synced_options(store, true, &NotSyncedOptions::default()).await?;
    init_startup_options(store, actions, &StartupOverrides::default()).await
}

/// Bootstrap an instance that will pull its synced options from a sync server
///
/// `initialized` stays `false` until the sync subsystem finishes the first pull.
pub async fn bootstrap_for_sync(store: &OptionStore, opts: &NotSyncedOptions) -> Result<()> {
    log::info!(
        "Bootstrapping options for sync from '{}'",
        opts.sync_server_host.as_deref().unwrap_or_default()
    );
    init_document_options(store).await?;
    init_not_synced_options(store, false, opts).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_note_contexts_encoding() {
        assert_eq!(
            open_note_contexts("root").unwrap(),
            r#"[{"notePath":"root","active":true}]"#
        );
    }

    #[test]
    fn test_truthy_flag() {
        assert!(is_truthy_flag("1"));
        assert!(is_truthy_flag("true"));
        assert!(is_truthy_flag("yes"));
        assert!(!is_truthy_flag(""));
        assert!(!is_truthy_flag("0"));
        assert!(!is_truthy_flag("FALSE"));
    }

    #[test]
    fn test_random_secure_token() {
        let a = random_secure_token(DOCUMENT_TOKEN_LENGTH);
        let b = random_secure_token(DOCUMENT_TOKEN_LENGTH);
        assert_eq!(a.len(), DOCUMENT_TOKEN_LENGTH);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_backup_timestamp_format() {
        let now = utc_now_date_time();
        assert!(chrono::NaiveDateTime::parse_from_str(&now, "%Y-%m-%d %H:%M:%S%.3fZ").is_ok());
    }
}
