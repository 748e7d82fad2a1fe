// src/packages/control.rs

//! Debian `control` file key/value metadata

/// Ordered field map parsed from a `control` file
///
/// Keys are case-sensitive. Re-inserting a key replaces its value but keeps
/// the position where it was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlMetadata {
    fields: Vec<(String, String)>,
}

impl ControlMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse control text
    ///
    /// Every line holding a `": "` separator is split on its first
    /// occurrence; key and value are trimmed. Other lines are ignored.
    pub fn parse(content: &str) -> Self {
        let mut metadata = Self::new();

        for line in content.trim().lines() {
            if let Some((key, value)) = line.split_once(": ") {
                metadata.insert(key.trim(), value.trim());
            }
        }

        metadata
    }

    /// Insert or replace a field
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get a field, or `default` when absent
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The `Package` field, the package identifier
    pub fn package(&self) -> Option<&str> {
        self.get("Package")
    }

    pub fn version(&self) -> Option<&str> {
        self.get("Version")
    }

    pub fn description(&self) -> Option<&str> {
        self.get("Description")
    }

    /// Iterate fields in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ControlMetadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Self::new();
        for (k, v) in iter {
            metadata.insert(k, v);
        }
        metadata
    }
}
