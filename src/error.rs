//! Error types for confview.
//!
//! Every failure is surfaced to the caller as a distinct variant. Nothing is
//! recovered or defaulted internally.

use std::path::{Path, PathBuf};

use crate::formats::Format;
use crate::template::ValidationError;

/// Result type alias for confview operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while loading, reading, validating or generating configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A `Config` was constructed from something that is not a mapping
    #[error("config data must be a mapping, got {found}")]
    InvalidInput { found: &'static str },

    /// A parsed document was not a mapping at the top level
    #[error("{format} document must contain a top-level mapping, got {found}")]
    InvalidTopLevel { format: Format, found: &'static str },

    /// Key-style lookup of an absent key
    #[error("key not found: '{0}'")]
    KeyNotFound(String),

    /// Field-style lookup of an absent field
    #[error("config has no field '{0}'")]
    FieldNotFound(String),

    #[error("config file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed source text
    #[error("failed to parse {format} config{}: {message}", origin(.path))]
    Parse {
        format: Format,
        path: Option<PathBuf>,
        message: String,
    },

    #[error("failed to serialize {format}: {message}")]
    Serialize { format: Format, message: String },

    #[error("unsupported format '{0}'. Use 'json', 'yaml', 'toml' or 'ini'")]
    UnsupportedFormat(String),

    /// The format is known but its adapter was compiled out
    #[error("{0} support not enabled. Enable the '{0}' feature.")]
    FormatDisabled(Format),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    pub(crate) fn parse(format: Format, message: impl ToString) -> Self {
        Error::Parse {
            format,
            path: None,
            message: message.to_string(),
        }
    }

    pub(crate) fn serialize(format: Format, message: impl ToString) -> Self {
        Error::Serialize {
            format,
            message: message.to_string(),
        }
    }

    /// Attach the source file to a parse error
    pub(crate) fn with_path(self, file: &Path) -> Self {
        match self {
            Error::Parse {
                format, message, ..
            } => Error::Parse {
                format,
                path: Some(file.to_path_buf()),
                message,
            },
            other => other,
        }
    }

    pub(crate) fn read(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

fn origin(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" {}", path.display()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_mentions_path_once_attached() {
        let err = Error::parse(Format::Json, "expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "failed to parse json config: expected value at line 1 column 1"
        );

        let err = err.with_path(Path::new("settings.json"));
        assert_eq!(
            err.to_string(),
            "failed to parse json config settings.json: expected value at line 1 column 1"
        );
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(
            Error::read(Path::new("missing.yaml"), io),
            Error::NotFound { .. }
        ));

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(
            Error::read(Path::new("locked.yaml"), io),
            Error::Io { .. }
        ));
    }
}
