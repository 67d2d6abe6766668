use serde_json::{Map, Value};

use super::{Adapter, Format};
use crate::{Error, Result};

/// Key the `toml` crate uses to carry datetimes through serde
const DATETIME_KEY: &str = "$__toml_private_datetime";

/// TOML adapter.
///
/// TOML has no null, so null values are dropped on serialization. Datetimes
/// are surfaced as strings when parsing.
///
/// TOML requires plain keys before tables, so serialized output lists
/// plain values first and tables or arrays of tables after them. Key order
/// can therefore differ from the tree's order.
pub struct Toml;

impl Adapter for Toml {
    const FORMAT: Format = Format::Toml;

    fn parse(text: &str) -> Result<Value> {
        let mut tree: Value = ::toml::from_str(text).map_err(|e| Error::parse(Self::FORMAT, e))?;
        flatten_datetimes(&mut tree);
        Ok(tree)
    }

    fn serialize(tree: &Value) -> Result<String> {
        ::toml::to_string_pretty(&without_nulls(tree)).map_err(|e| Error::serialize(Self::FORMAT, e))
    }
}

fn flatten_datetimes(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let datetime = match map.get(DATETIME_KEY) {
                Some(Value::String(datetime)) if map.len() == 1 => Some(datetime.clone()),
                _ => None,
            };
            match datetime {
                Some(datetime) => *value = Value::String(datetime),
                None => map.values_mut().for_each(flatten_datetimes),
            }
        }
        Value::Array(items) => items.iter_mut().for_each(flatten_datetimes),
        _ => {}
    }
}

fn without_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), without_nulls(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .filter(|v| !v.is_null())
                .map(without_nulls)
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_tables() {
        let tree = Toml::parse("name = \"TomlTest\"\nvalue = 789\n\n[server]\nport = 8080\n").unwrap();
        assert_eq!(
            tree,
            json!({"name": "TomlTest", "value": 789, "server": {"port": 8080}})
        );
    }

    #[test]
    fn test_parse_datetime_as_string() {
        let tree = Toml::parse("released = 1979-05-27T07:32:00Z\n").unwrap();
        assert_eq!(tree, json!({"released": "1979-05-27T07:32:00Z"}));
    }

    #[test]
    fn test_top_level_array_is_a_parse_error() {
        let err = Toml::parse("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, Error::Parse { format: Format::Toml, .. }));
    }

    #[test]
    fn test_serialize_drops_nulls() {
        let tree = json!({"name": "example", "unknown": null, "nested": {"value": 0, "gone": null}});
        let text = Toml::serialize(&tree).unwrap();

        assert!(!text.contains("unknown"));
        assert_eq!(
            Toml::parse(&text).unwrap(),
            json!({"name": "example", "nested": {"value": 0}})
        );
    }
}
