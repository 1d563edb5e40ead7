//! Options system for persistent, typed application settings
//!
//! The options system provides:
//! - A database-backed store of string-encoded options with typed accessors
//! - Synced vs. device-local options, fixed at creation
//! - Idempotent startup defaulting, including defaults derived from other options
//! - One-time bootstrap of identity and local options for new instances

pub mod defaults;
pub mod entity;
pub mod error;
pub mod init;
pub mod keyboard;
pub mod names;
pub mod store;
pub mod types;

pub use defaults::{default_options, DefaultOption, DefaultValue};
pub use entity::{OptionMap, OptionRecord};
pub use error::{OptionsError, Result};
pub use init::{
    bootstrap_for_sync, bootstrap_new_instance, init_document_options, init_not_synced_options,
    init_startup_options, NotSyncedOptions, StartupOverrides, StartupReport,
};
pub use keyboard::{BuiltinKeyboardActions, KeyboardAction, KeyboardActionSource};
pub use names::OptionName;
pub use store::OptionStore;
pub use types::{OptionKind, OptionValue};
