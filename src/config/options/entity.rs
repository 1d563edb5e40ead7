//! Persisted option record and the snapshot map built from it

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::collections::BTreeMap;

/// Database representation of a single option
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct OptionRecord {
    pub name: String,
    pub value: String,
    /// Fixed at creation; replicated by the sync subsystem when set
    pub is_synced: bool,
    pub utc_date_modified: DateTime<Utc>,
}

impl OptionRecord {
    pub fn new(name: impl Into<String>, value: impl Into<String>, is_synced: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            is_synced,
            utc_date_modified: Utc::now(),
        }
    }

    /// Replace the value and bump the modification time
    pub fn touch(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.utc_date_modified = Utc::now();
    }
}

/// Point-in-time snapshot of all options as raw strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionMap {
    values: BTreeMap<String, String>,
}

impl OptionMap {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for OptionMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<OptionRecord>> for OptionMap {
    fn from(records: Vec<OptionRecord>) -> Self {
        records.into_iter().map(|r| (r.name, r.value)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_bumps_timestamp() {
        let mut record = OptionRecord::new("theme", "dark", false);
        let created = record.utc_date_modified;
        record.touch("light");
        assert_eq!(record.value, "light");
        assert!(record.utc_date_modified >= created);
        assert!(!record.is_synced);
    }

    #[test]
    fn test_map_from_records() {
        let map = OptionMap::from(vec![
            OptionRecord::new("theme", "light", false),
            OptionRecord::new("locale", "en", true),
        ]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("theme"), Some("light"));
        assert!(!map.contains("zoomFactor"));
    }
}
