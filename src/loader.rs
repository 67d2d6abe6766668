//! File entry points
//!
//! Every loader reads the file, parses it with the matching adapter and
//! requires a mapping at the top level before wrapping it in a [`Config`].

use std::path::Path;

use serde_json::Value;

use crate::config::{Config, value_kind};
use crate::formats::Format;
use crate::{Error, Result};

/// Load a JSON configuration file
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Config> {
    load_as(path, Format::Json)
}

/// Load a YAML configuration file
pub fn load_yaml<P: AsRef<Path>>(path: P) -> Result<Config> {
    load_as(path, Format::Yaml)
}

/// Load a TOML configuration file
pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Config> {
    load_as(path, Format::Toml)
}

/// Load an INI configuration file; all values are strings
pub fn load_ini<P: AsRef<Path>>(path: P) -> Result<Config> {
    load_as(path, Format::Ini)
}

/// Load a configuration file in an explicit format
pub fn load_as<P: AsRef<Path>>(path: P, format: Format) -> Result<Config> {
    let path = path.as_ref();
    let content = read(path)?;

    tracing::debug!("Parsing {} config: {}", format, path.display());
    let tree = format.parse(&content).map_err(|e| e.with_path(path))?;
    document(format, tree)
}

/// Load a configuration file in any supported format.
///
/// The format comes from the file extension when it names one. Otherwise it
/// is detected from the content, and if that guess does not yield a mapping
/// the other enabled formats are tried in turn. The first error is reported
/// when none succeed.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();

    if let Some(format) = Format::from_path(path) {
        return load_as(path, format);
    }

    let content = read(path)?;
    let detected = Format::detect(&content);
    tracing::trace!(
        "LOADER: detected {} for {}",
        detected,
        path.display()
    );

    let mut first_error = None;
    let candidates = std::iter::once(detected).chain(
        Format::ALL
            .into_iter()
            .filter(|format| *format != detected && format.is_enabled()),
    );

    for format in candidates {
        match format.parse(&content).and_then(|tree| document(format, tree)) {
            Ok(config) => return Ok(config),
            Err(err) => {
                tracing::trace!("LOADER: {} rejected {}: {}", format, path.display(), err);
                first_error.get_or_insert(err.with_path(path));
            }
        }
    }

    Err(first_error.unwrap_or_else(|| Error::parse(detected, "no format could parse the file")))
}

/// Require a mapping at the top level of a parsed document
pub(crate) fn document(format: Format, tree: Value) -> Result<Config> {
    match tree {
        Value::Object(map) => Ok(Config::from_map(map)),
        other => Err(Error::InvalidTopLevel {
            format,
            found: value_kind(&other),
        }),
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::read(path, e))
}
