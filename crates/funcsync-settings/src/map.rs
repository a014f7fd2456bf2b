//! Ordered settings map
//!
//! App settings are a JSON object of string keys to string values. Key order
//! is significant for reconciliation (categories are reported in source
//! order), so the map preserves insertion order and removal keeps the
//! relative order of the remaining keys.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from setting name to setting value.
///
/// Keys are case-sensitive and unique. Serializes as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsMap(IndexMap<String, String>);

impl SettingsMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of settings in the map.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the map holds no settings.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a setting value by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns true if the setting exists, regardless of its value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns true if the setting exists with a non-empty value.
    pub fn has_value(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_empty())
    }

    /// Insert or overwrite a setting, returning the previous value if any.
    ///
    /// A new key lands at the end of the iteration order; an existing key
    /// keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a setting, preserving the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key)
    }

    /// Iterate over setting names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate over (name, value) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for SettingsMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for SettingsMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl IntoIterator for SettingsMap {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
