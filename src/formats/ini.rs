use ::ini::{EscapePolicy, ParseOption, WriteOption};
use serde_json::{Map, Value};

use super::{Adapter, Format};
use crate::{Error, Result};

const DEFAULT_SECTION: &str = "DEFAULT";

/// INI adapter.
///
/// INI has one level of nesting. Properties outside any section and in
/// `[DEFAULT]` map to top-level keys; every other section maps to a nested
/// mapping. All parsed values are strings.
///
/// When serializing, top-level scalars go to `[DEFAULT]` and nested mappings
/// become sections. Anything deeper is written inline as JSON text, and null
/// becomes an empty value. Empty mappings produce no section.
///
/// Values are read and written verbatim: no quote stripping, no escapes.
///
/// A top-level key sharing its name with a section is a parse error, and a
/// nested mapping named `DEFAULT` cannot be serialized.
pub struct Ini;

impl Adapter for Ini {
    const FORMAT: Format = Format::Ini;

    fn parse(text: &str) -> Result<Value> {
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = ::ini::Ini::load_from_str_opt(text, options)
            .map_err(|e| Error::parse(Self::FORMAT, e))?;
        let mut root = Map::new();

        for (_, properties) in ini
            .iter()
            .filter(|(section, _)| matches!(section, None | Some(DEFAULT_SECTION)))
        {
            for (key, value) in properties.iter() {
                root.insert(key.to_string(), Value::String(value.to_string()));
            }
        }

        for (name, properties) in ini.iter().filter_map(|(section, properties)| match section {
            None | Some(DEFAULT_SECTION) => None,
            Some(name) => Some((name, properties)),
        }) {
            let entry = root
                .entry(name.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            let Value::Object(table) = entry else {
                return Err(Error::parse(
                    Self::FORMAT,
                    format!("top-level key '{name}' collides with section [{name}]"),
                ));
            };

            for (key, value) in properties.iter() {
                table.insert(key.to_string(), Value::String(value.to_string()));
            }
        }

        Ok(Value::Object(root))
    }

    fn serialize(tree: &Value) -> Result<String> {
        let Value::Object(root) = tree else {
            return Err(Error::serialize(
                Self::FORMAT,
                "INI documents must be a mapping",
            ));
        };

        if root.get(DEFAULT_SECTION).is_some_and(Value::is_object) {
            return Err(Error::serialize(
                Self::FORMAT,
                "a mapping named DEFAULT would merge into the top-level section",
            ));
        }

        let mut ini = ::ini::Ini::new();

        for (key, value) in root.iter().filter(|(_, v)| !v.is_object()) {
            ini.with_section(Some(DEFAULT_SECTION))
                .set(key.as_str(), inline_text(value));
        }

        for (name, value) in root {
            if let Value::Object(table) = value {
                let mut section = ini.with_section(Some(name.as_str()));
                for (key, value) in table {
                    section.set(key.as_str(), inline_text(value));
                }
            }
        }

        let mut buffer = Vec::new();
        let options = WriteOption {
            escape_policy: EscapePolicy::Nothing,
            ..WriteOption::default()
        };
        ini.write_to_opt(&mut buffer, options)
            .map_err(|e| Error::serialize(Self::FORMAT, e))?;

        String::from_utf8(buffer).map_err(|e| Error::serialize(Self::FORMAT, e))
    }
}

fn inline_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
