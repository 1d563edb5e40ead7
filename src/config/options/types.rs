//! Core value types for the options system
//!
//! Every option is persisted as a string. `OptionValue` is the typed view of
//! that string and `OptionKind` owns the single parse path for each kind.

use super::error::{OptionsError, Result};
use std::fmt;

/// A strongly-typed option value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl OptionValue {
    /// Encode for storage: decimal integers, `true`/`false`, strings verbatim
    pub fn encode(&self) -> String {
        match self {
            OptionValue::Bool(v) => v.to_string(),
            OptionValue::Int(v) => v.to_string(),
            OptionValue::String(v) => v.clone(),
        }
    }

    pub fn kind(&self) -> OptionKind {
        match self {
            OptionValue::Bool(_) => OptionKind::Bool,
            OptionValue::Int(_) => OptionKind::Int,
            OptionValue::String(_) => OptionKind::Text,
        }
    }

    /// Get as bool, returning None if wrong kind
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as int, returning None if wrong kind
    pub fn as_int(&self) -> Option<i64> {
        match self {
            OptionValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string slice, returning None if wrong kind
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Bool(v)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        OptionValue::Int(v)
    }
}

impl From<i32> for OptionValue {
    fn from(v: i32) -> Self {
        OptionValue::Int(v.into())
    }
}

impl From<u32> for OptionValue {
    fn from(v: u32) -> Self {
        OptionValue::Int(v.into())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::String(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::String(v.to_string())
    }
}

impl From<&String> for OptionValue {
    fn from(v: &String) -> Self {
        OptionValue::String(v.clone())
    }
}

/// Semantic kind an option's string is interpreted as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Text,
    Int,
    Bool,
}

impl OptionKind {
    /// Label used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            OptionKind::Text => "string",
            OptionKind::Int => "integer",
            OptionKind::Bool => "boolean",
        }
    }

    /// Check if a value matches this kind
    pub fn matches(&self, value: &OptionValue) -> bool {
        *self == value.kind()
    }

    /// Parse a stored string as this kind
    ///
    /// Booleans accept exactly `"true"` and `"false"`; integers are base-10
    /// with an optional sign and no surrounding whitespace.
    pub fn parse(&self, name: &str, raw: &str) -> Result<OptionValue> {
        match self {
            OptionKind::Text => Ok(OptionValue::String(raw.to_string())),
            OptionKind::Int => parse_int(name, raw).map(OptionValue::Int),
            OptionKind::Bool => parse_bool(name, raw).map(OptionValue::Bool),
        }
    }
}

pub(crate) fn parse_int(name: &str, raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| OptionsError::parse(name, raw, OptionKind::Int.label()))
}

pub(crate) fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(OptionsError::parse(name, raw, OptionKind::Bool.label())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(OptionValue::Bool(true).encode(), "true");
        assert_eq!(OptionValue::Int(-12).encode(), "-12");
        assert_eq!(OptionValue::from("dark").encode(), "dark");
    }

    #[test]
    fn test_bool_parse_is_strict() {
        let kind = OptionKind::Bool;
        assert_eq!(kind.parse("x", "true").unwrap(), OptionValue::Bool(true));
        assert_eq!(kind.parse("x", "false").unwrap(), OptionValue::Bool(false));

        for raw in ["1", "0", "TRUE", "True", "yes", "", " true"] {
            let err = kind.parse("x", raw).unwrap_err();
            assert!(matches!(err, OptionsError::Parse { expected: "boolean", .. }), "{raw}");
        }
    }

    #[test]
    fn test_int_parse() {
        let kind = OptionKind::Int;
        assert_eq!(kind.parse("x", "42").unwrap(), OptionValue::Int(42));
        assert_eq!(kind.parse("x", "-7").unwrap(), OptionValue::Int(-7));
        assert!(kind.parse("x", "4.2").is_err());
        assert!(kind.parse("x", " 42").is_err());
    }

    #[test]
    fn test_parse_error_names_option_and_value() {
        let err = OptionKind::Int.parse("leftPaneWidth", "wide").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("leftPaneWidth"));
        assert!(msg.contains("wide"));
    }

    #[test]
    fn test_kind_matches() {
        assert!(OptionKind::Text.matches(&OptionValue::from("a")));
        assert!(!OptionKind::Int.matches(&OptionValue::Bool(true)));
    }
}
