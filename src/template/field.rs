use std::fmt;

use serde_json::{Map, Value};

use super::Template;
use crate::config::Node;

/// Expected type of a template field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Integer,
    Float,
    String,
    Boolean,
    List,
    Mapping,
    Null,
    /// A type no loaded value can have; validation always fails, examples are null
    Opaque(String),
    /// A nested template validated recursively
    Template(Template),
}

impl FieldType {
    /// Capture the type of a default value
    pub fn of(value: &Node) -> Self {
        match value {
            Node::Null => FieldType::Null,
            Node::Bool(_) => FieldType::Boolean,
            Node::Number(_) if value.is_float() => FieldType::Float,
            Node::Number(_) => FieldType::Integer,
            Node::String(_) => FieldType::String,
            Node::List(_) => FieldType::List,
            Node::Section(_) => FieldType::Mapping,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
            FieldType::List => "list",
            FieldType::Mapping => "mapping",
            FieldType::Null => "null",
            FieldType::Opaque(name) => name,
            FieldType::Template(template) => template.name(),
        }
    }

    /// Whether a value satisfies this type.
    ///
    /// Booleans are not integers and integers are not floats.
    pub fn accepts(&self, value: &Node) -> bool {
        match self {
            FieldType::Integer => value.is_integer(),
            FieldType::Float => value.is_float(),
            FieldType::String => matches!(value, Node::String(_)),
            FieldType::Boolean => matches!(value, Node::Bool(_)),
            FieldType::List => matches!(value, Node::List(_)),
            FieldType::Mapping | FieldType::Template(_) => matches!(value, Node::Section(_)),
            FieldType::Null => value.is_null(),
            FieldType::Opaque(_) => false,
        }
    }

    /// Placeholder used when generating example configuration
    pub fn example(&self) -> Value {
        match self {
            FieldType::Integer => Value::from(0),
            FieldType::Float => Value::from(0.0),
            FieldType::String => Value::from("example"),
            FieldType::Boolean => Value::Bool(false),
            FieldType::List => Value::Array(Vec::new()),
            FieldType::Mapping => Value::Object(Map::new()),
            FieldType::Null | FieldType::Opaque(_) => Value::Null,
            FieldType::Template(template) => template.example(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Template> for FieldType {
    fn from(template: Template) -> Self {
        FieldType::Template(template)
    }
}

impl From<&Template> for FieldType {
    fn from(template: &Template) -> Self {
        FieldType::Template(template.clone())
    }
}

/// One entry of a template's field table
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub(super) name: String,
    pub(super) ty: FieldType,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &FieldType {
        &self.ty
    }
}
