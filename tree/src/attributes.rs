use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Keys that name typed parts of a node rather than plain attributes.
pub(crate) const RESERVED_KEYS: &[&str] = &["type", "use", "children"];

/// An ordered map of attributes on a node.
///
/// The reserved keys (`type`, `use`, `children`) are excluded by
/// construction: inserting one is a no-op, so the map can never collide
/// with the typed fields of the node that owns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<String, Value>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one attribute, replacing any previous value under the same
    /// key. Reserved keys are ignored.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        if RESERVED_KEYS.contains(&key.as_str()) {
            return;
        }
        self.0.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }
}
