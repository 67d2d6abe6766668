//! Format adapters
//!
//! Each supported text format implements [`Adapter`]: parse text into a generic
//! tree (`serde_json::Value`) and serialize a generic tree back into text.
//! [`Format`] names a format and dispatches to its adapter.

mod detect;
mod json;

#[cfg(feature = "ini")]
mod ini;
#[cfg(feature = "toml")]
mod toml;
#[cfg(feature = "yaml")]
mod yaml;

pub use detect::detect_format_from_content;
pub use json::Json;

#[cfg(feature = "ini")]
pub use self::ini::Ini;
#[cfg(feature = "toml")]
pub use self::toml::Toml;
#[cfg(feature = "yaml")]
pub use self::yaml::Yaml;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde_json::Value;

use crate::{Error, Result};

/// Parse/serialize pair for one text format
pub trait Adapter {
    const FORMAT: Format;

    /// Parse text into a generic tree
    fn parse(text: &str) -> Result<Value>;

    /// Serialize a generic tree into text
    fn serialize(tree: &Value) -> Result<String>;
}

/// Supported configuration formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Yaml,
    Toml,
    Ini,
}

impl Format {
    pub const ALL: [Format; 4] = [Format::Json, Format::Yaml, Format::Toml, Format::Ini];

    pub fn name(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
            Format::Ini => "ini",
        }
    }

    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();

        match extension.as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            "toml" => Some(Format::Toml),
            "ini" | "cfg" => Some(Format::Ini),
            _ => None,
        }
    }

    /// Guess the format from file content
    pub fn detect(content: &str) -> Self {
        detect_format_from_content(content)
    }

    /// Whether this format's adapter was compiled in
    pub fn is_enabled(self) -> bool {
        match self {
            Format::Json => true,
            Format::Yaml => cfg!(feature = "yaml"),
            Format::Toml => cfg!(feature = "toml"),
            Format::Ini => cfg!(feature = "ini"),
        }
    }

    /// Parse text into a generic tree
    pub fn parse(self, text: &str) -> Result<Value> {
        match self {
            Format::Json => Json::parse(text),
            #[cfg(feature = "yaml")]
            Format::Yaml => Yaml::parse(text),
            #[cfg(feature = "toml")]
            Format::Toml => Toml::parse(text),
            #[cfg(feature = "ini")]
            Format::Ini => Ini::parse(text),
            #[allow(unreachable_patterns)]
            disabled => Err(Error::FormatDisabled(disabled)),
        }
    }

    /// Serialize a generic tree into text
    pub fn serialize(self, tree: &Value) -> Result<String> {
        match self {
            Format::Json => Json::serialize(tree),
            #[cfg(feature = "yaml")]
            Format::Yaml => Yaml::serialize(tree),
            #[cfg(feature = "toml")]
            Format::Toml => Toml::serialize(tree),
            #[cfg(feature = "ini")]
            Format::Ini => Ini::serialize(tree),
            #[allow(unreachable_patterns)]
            disabled => Err(Error::FormatDisabled(disabled)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = Error;

    /// Case-insensitive; `yml` is accepted as YAML
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            "ini" => Ok(Format::Ini),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}
