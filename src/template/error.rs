/// Failure reported by [`Template::validate`](super::Template::validate).
///
/// Failures inside nested templates are wrapped once per enclosing field, so the
/// message reads outermost field first.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: '{field}'")]
    MissingField { field: String },

    #[error("Field '{field}' expected type '{expected}', got '{actual}'")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: &'static str,
    },

    #[error("In field '{field}': {inner}")]
    Nested {
        field: String,
        inner: Box<ValidationError>,
    },
}

impl ValidationError {
    pub(crate) fn within(self, field: &str) -> Self {
        ValidationError::Nested {
            field: field.to_string(),
            inner: Box::new(self),
        }
    }

    /// The missing or mismatched field itself, without nesting
    pub fn cause(&self) -> &ValidationError {
        match self {
            ValidationError::Nested { inner, .. } => inner.cause(),
            other => other,
        }
    }

    /// Dotted path from the validation root to the failing field
    pub fn path(&self) -> String {
        let mut segments = Vec::new();
        let mut current = self;
        loop {
            match current {
                ValidationError::Nested { field, inner } => {
                    segments.push(field.as_str());
                    current = &**inner;
                }
                ValidationError::MissingField { field }
                | ValidationError::TypeMismatch { field, .. } => {
                    segments.push(field.as_str());
                    break;
                }
            }
        }
        segments.join(".")
    }
}
