//! Error types for the validation crate

use inline_editor_common::{ErrorSeverity, Severity};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ValidationError>;

/// Misuse of a model record. Failing a constraint is not an error; it is
/// reported through [`ValidationReport`](crate::ValidationReport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Unknown field '{field}'")]
    UnknownField { field: String },

    #[error("Field '{field}' expects {expected}, got {found}")]
    ValueMismatch {
        field: String,
        expected: String,
        found: String,
    },
}

impl Severity for ValidationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }
}
