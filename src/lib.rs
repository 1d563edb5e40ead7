//! Persistent, partially synchronized option store for a notes application.
//!
//! Initialization order: load [`config::AppConfig`], open the database with
//! [`config::open_store`] (runs schema migrations), bootstrap new instances,
//! then run [`config::options::init_startup_options`] and pass the resulting
//! [`config::options::OptionStore`] to the rest of the application.

pub mod cli;
pub mod config;

pub use config::options::{OptionName, OptionStore, OptionValue, OptionsError};
