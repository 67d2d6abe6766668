//! Dot-accessible configuration view
//!
//! A [`Config`] wraps a parsed mapping and recursively converts every nested
//! mapping, including those found inside lists, into another `Config`. Values
//! can be read by key ([`Config::get`]) or by field name ([`Config::attr`]);
//! both read the same store and differ only in the error they report.

mod node;

pub use node::Node;

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::formats::Format;
use crate::template::{Template, ValidationError};
use crate::{Error, Result};

/// Configuration view over a mapping, preserving key order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    entries: IndexMap<String, Node>,
}

impl Config {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a generic tree, which must be a mapping
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(Error::InvalidInput {
                found: value_kind(&other),
            }),
        }
    }

    pub(crate) fn from_map(map: Map<String, Value>) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(key, value)| (key, Node::from(value)))
                .collect(),
        }
    }

    /// Parse in-memory text in the given format
    pub fn parse_str(text: &str, format: Format) -> Result<Self> {
        crate::loader::document(format, format.parse(text)?)
    }

    /// Key-style lookup
    pub fn get(&self, key: &str) -> Result<&Node> {
        self.entries
            .get(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))
    }

    /// Field-style lookup, reading the same store as [`Config::get`]
    pub fn attr(&self, name: &str) -> Result<&Node> {
        self.entries
            .get(name)
            .ok_or_else(|| Error::FieldNotFound(name.to_string()))
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut Node> {
        self.entries
            .get_mut(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))
    }

    pub fn attr_mut(&mut self, name: &str) -> Result<&mut Node> {
        self.entries
            .get_mut(name)
            .ok_or_else(|| Error::FieldNotFound(name.to_string()))
    }

    /// Create or overwrite a key, returning the previous value.
    ///
    /// A `serde_json::Value` passed here is converted recursively, so assigned
    /// mappings become sections like everything loaded from a file.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Node>) -> Option<Node> {
        self.entries.insert(key.into(), value.into())
    }

    /// Field-style assignment, writing the same store as [`Config::set`]
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<Node>) -> Option<Node> {
        self.set(name, value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read a nested value by dotted path, e.g. `database.replicas.0.host`.
    ///
    /// Numeric segments index into lists.
    pub fn lookup(&self, path: &str) -> Option<&Node> {
        let mut segments = path.split('.');
        let mut current = self.entries.get(segments.next()?)?;

        for segment in segments {
            current = match current {
                Node::Section(config) => config.entries.get(segment)?,
                Node::List(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }

        Some(current)
    }

    /// Validate against a template; shorthand for `template.validate(self)`
    pub fn validate(&self, template: &Template) -> std::result::Result<(), ValidationError> {
        template.validate(self)
    }

    /// Convert back into a generic tree
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(key, node)| (key.clone(), node.to_value()))
                .collect(),
        )
    }

    /// Serialize the configuration in the given format
    pub fn dump(&self, format: Format) -> Result<String> {
        format.serialize(&self.to_value())
    }
}

impl TryFrom<Value> for Config {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl FromIterator<(String, Node)> for Config {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Config {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, node) in &self.entries {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Config::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// Name of a generic tree value's shape, for shape errors
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
