//! View-model module
//!
//! A `Model` is the ordered attribute set a page handler builds for one
//! request and hands to the renderer. Handlers only insert; the renderer only
//! reads. Nothing mutates a model once it has been passed on.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Ordered attribute map built fresh per request.
///
/// Backed by a vector of pairs so attributes serialize in insertion order.
/// Re-inserting an existing key replaces the value in place and keeps the
/// original position.
#[derive(Debug, Clone, Default)]
pub struct Model {
    entries: Vec<(String, Value)>,
}

impl Model {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute, converting any serializable value.
    ///
    /// Handlers only insert literals and small demo objects; a value that
    /// fails JSON conversion is stored as null rather than aborting the
    /// request.
    pub fn insert<T: Serialize>(&mut self, key: &str, value: T) {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        match self.entries.iter().position(|(k, _)| k == key) {
            Some(idx) => self.entries[idx].1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for Model {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
