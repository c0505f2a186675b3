//! Error types for input adapters

use inline_editor_common::{ErrorSeverity, Severity};
use thiserror::Error;

/// Result type for adapter operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur while building or using an input adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldsError {
    /// User text could not be converted to the bound field's type.
    ///
    /// The message is the same for every cause: empty, malformed and out of
    /// range input all read alike at this layer.
    #[error("The field '{field}' could not be parsed.")]
    ParseFailed { field: String },

    /// The adapter was wired to a type outside the supported set
    #[error("input adapters do not support the type '{type_name}'")]
    UnsupportedType { type_name: String },

    /// The date-time display format cannot be used for parsing and formatting
    #[error("invalid date-time format '{format}': {reason}")]
    InvalidDateFormat { format: String, reason: String },

    /// A value was assigned that does not fit the adapter's type tag
    #[error("field '{field}' expects a {expected} value, got {found}")]
    ValueMismatch {
        field: String,
        expected: String,
        found: String,
    },
}

impl FieldsError {
    pub(crate) fn invalid_format(format: &str, reason: impl Into<String>) -> Self {
        FieldsError::InvalidDateFormat {
            format: format.to_string(),
            reason: reason.into(),
        }
    }
}

impl Severity for FieldsError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            FieldsError::ParseFailed { .. } => ErrorSeverity::Warning,
            FieldsError::UnsupportedType { .. }
            | FieldsError::InvalidDateFormat { .. }
            | FieldsError::ValueMismatch { .. } => ErrorSeverity::Critical,
        }
    }
}
