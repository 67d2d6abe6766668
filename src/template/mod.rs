//! Declarative configuration templates
//!
//! A [`Template`] is a named, ordered table of field names and expected types.
//! It validates a loaded [`Config`] (presence and type of each field, recursing
//! into nested templates) and generates example configuration files.
//!
//! Templates are built once, usually into a static:
//!
//! ```rust
//! use std::sync::LazyLock;
//! use confview::{Config, FieldType, Template};
//!
//! static DATABASE: LazyLock<Template> = LazyLock::new(|| {
//!     Template::builder("Database")
//!         .field("host", FieldType::String)
//!         .field("port", FieldType::Integer)
//!         .build()
//! });
//!
//! static APP: LazyLock<Template> = LazyLock::new(|| {
//!     Template::builder("App")
//!         .field("name", FieldType::String)
//!         .nested("database", &DATABASE)
//!         .build()
//! });
//!
//! let config = Config::parse_str(
//!     r#"{"name": "demo", "database": {"host": "localhost", "port": "5432"}}"#,
//!     confview::Format::Json,
//! )
//! .unwrap();
//!
//! let err = APP.validate(&config).unwrap_err();
//! assert_eq!(err.path(), "database.port");
//! ```

mod error;
mod field;

pub use error::ValidationError;
pub use field::{Field, FieldType};

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::{Config, Node};
use crate::formats::Format;
use crate::Result;

/// A named field table with validation and example generation.
///
/// Cloning is cheap; clones share the same immutable table.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    inner: Arc<Inner>,
}

#[derive(Debug, PartialEq)]
struct Inner {
    name: String,
    fields: Vec<Field>,
}

impl Template {
    pub fn builder(name: impl Into<String>) -> TemplateBuilder {
        TemplateBuilder {
            name: name.into(),
            declared: Vec::new(),
            defaults: Vec::new(),
        }
    }

    /// Build a template whose field types are captured from default values
    pub fn from_defaults<K, V, I>(name: impl Into<String>, defaults: I) -> Self
    where
        K: Into<String>,
        V: Into<Node>,
        I: IntoIterator<Item = (K, V)>,
    {
        defaults
            .into_iter()
            .fold(Self::builder(name), |builder, (field, value)| {
                builder.default(field, value)
            })
            .build()
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Field table in declaration order
    pub fn fields(&self) -> &[Field] {
        &self.inner.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldType> {
        self.inner
            .fields
            .iter()
            .find(|field| field.name == name)
            .map(Field::ty)
    }

    /// Check that every field is present with the expected type.
    ///
    /// Stops at the first failure, in field declaration order.
    pub fn validate(&self, config: &Config) -> std::result::Result<(), ValidationError> {
        tracing::trace!("TEMPLATE: validating against {}", self.name());

        for field in self.fields() {
            let value = config
                .attr(&field.name)
                .map_err(|_| ValidationError::MissingField {
                    field: field.name.clone(),
                })?;

            if !field.ty.accepts(value) {
                return Err(ValidationError::TypeMismatch {
                    field: field.name.clone(),
                    expected: field.ty.name().to_string(),
                    actual: value.type_name(),
                });
            }

            if let (FieldType::Template(nested), Node::Section(section)) = (&field.ty, value) {
                nested
                    .validate(section)
                    .map_err(|err| err.within(&field.name))?;
            }
        }

        Ok(())
    }

    /// Example generic tree with a placeholder per field, in declaration order
    pub fn example(&self) -> Value {
        Value::Object(self.example_map())
    }

    /// Example configuration as a [`Config`]
    pub fn example_config(&self) -> Config {
        Config::from_map(self.example_map())
    }

    fn example_map(&self) -> Map<String, Value> {
        self.fields()
            .iter()
            .map(|field| (field.name.clone(), field.ty.example()))
            .collect()
    }

    /// Generate an example configuration file.
    ///
    /// `format` is case-insensitive: `json`, `yaml`/`yml`, `toml` or `ini`.
    pub fn generate(&self, format: &str) -> Result<String> {
        self.generate_as(format.parse()?)
    }

    pub fn generate_as(&self, format: Format) -> Result<String> {
        tracing::trace!("TEMPLATE: generating {} example for {}", format, self.name());
        format.serialize(&self.example())
    }
}

/// Declares the fields of a [`Template`].
///
/// Explicitly typed fields take precedence: when any [`field`](Self::field) or
/// [`nested`](Self::nested) declaration is present, default-value declarations
/// are ignored entirely.
#[derive(Debug)]
pub struct TemplateBuilder {
    name: String,
    declared: Vec<Field>,
    defaults: Vec<Field>,
}

impl TemplateBuilder {
    /// Declare a field with an explicit type
    pub fn field(mut self, name: impl Into<String>, ty: impl Into<FieldType>) -> Self {
        upsert(&mut self.declared, name.into(), ty.into());
        self
    }

    /// Declare a field validated by another template
    pub fn nested(self, name: impl Into<String>, template: &Template) -> Self {
        self.field(name, template)
    }

    /// Declare a field by default value; only the value's type is kept.
    ///
    /// Names starting with an underscore are private and skipped.
    pub fn default(mut self, name: impl Into<String>, value: impl Into<Node>) -> Self {
        let name = name.into();
        if name.starts_with('_') {
            tracing::trace!("TEMPLATE: skipping private default '{}'", name);
            return self;
        }
        let ty = FieldType::of(&value.into());
        upsert(&mut self.defaults, name, ty);
        self
    }

    pub fn build(self) -> Template {
        let fields = if self.declared.is_empty() {
            self.defaults
        } else {
            self.declared
        };

        tracing::trace!(
            "TEMPLATE: built {} with {} field(s)",
            self.name,
            fields.len()
        );

        Template {
            inner: Arc::new(Inner {
                name: self.name,
                fields,
            }),
        }
    }
}

/// Redeclaring a field keeps its original position
fn upsert(fields: &mut Vec<Field>, name: String, ty: FieldType) {
    match fields.iter_mut().find(|field| field.name == name) {
        Some(field) => field.ty = ty,
        None => fields.push(Field { name, ty }),
    }
}
