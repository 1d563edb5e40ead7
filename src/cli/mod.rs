//! Command-line front end

pub mod app;
pub mod commands;

pub use app::{Cli, Commands};
