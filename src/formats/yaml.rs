use serde_json::Value;

use super::{Adapter, Format};
use crate::{Error, Result};

/// YAML adapter, block style
pub struct Yaml;

impl Adapter for Yaml {
    const FORMAT: Format = Format::Yaml;

    fn parse(text: &str) -> Result<Value> {
        serde_yml::from_str(text).map_err(|e| Error::parse(Self::FORMAT, e))
    }

    fn serialize(tree: &Value) -> Result<String> {
        serde_yml::to_string(tree).map_err(|e| Error::serialize(Self::FORMAT, e))
    }
}
