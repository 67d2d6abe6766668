use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::{Adapter, Format};
use crate::{Error, Result};

/// JSON adapter, pretty-printed with four-space indentation
pub struct Json;

impl Adapter for Json {
    const FORMAT: Format = Format::Json;

    fn parse(text: &str) -> Result<Value> {
        serde_json::from_str(text).map_err(|e| Error::parse(Self::FORMAT, e))
    }

    fn serialize(tree: &Value) -> Result<String> {
        let mut buffer = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
        tree.serialize(&mut serializer)
            .map_err(|e| Error::serialize(Self::FORMAT, e))?;

        String::from_utf8(buffer).map_err(|e| Error::serialize(Self::FORMAT, e))
    }
}
