//! Error taxonomy for option operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("Option '{name}' does not exist")]
    NotFound { name: String },

    #[error("Could not parse '{value}' into {expected} for option '{name}'")]
    Parse {
        name: String,
        value: String,
        expected: &'static str,
    },

    #[error("Option '{name}' already exists")]
    AlreadyExists { name: String },

    #[error("Option '{name}' expects a {expected} value, got {actual}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Failed to persist option: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("Failed to encode option value: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OptionsError>;

impl OptionsError {
    pub(crate) fn not_found(name: &str) -> Self {
        Self::NotFound {
            name: name.to_string(),
        }
    }

    pub(crate) fn parse(name: &str, value: &str, expected: &'static str) -> Self {
        Self::Parse {
            name: name.to_string(),
            value: value.to_string(),
            expected,
        }
    }

    /// Whether this is the missing-option condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
