//! Error severity classification shared by the inline editor crates
//!
//! Input adapters produce two very different kinds of failure: a user typed
//! something that does not parse (the form stays interactive and the user
//! corrects it) and an adapter was wired to a type it cannot handle (a
//! programming mistake that must surface loudly). Every error type in the
//! workspace implements [`Severity`] so hosts can route the two apart.

/// Severity levels for error classification
///
/// # Examples
///
/// ```rust
/// use inline_editor_common::ErrorSeverity;
///
/// // A malformed number in a text box is expected and recoverable
/// let typo = ErrorSeverity::Warning;
///
/// // A broken config file stops one load but the form keeps working
/// let bad_config = ErrorSeverity::Error;
///
/// // An adapter bound to an unsupported type can never work
/// let miswired = ErrorSeverity::Critical;
/// # assert_ne!(typo, miswired);
/// # assert_ne!(bad_config, miswired);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    /// Recoverable input problem, reported next to the field
    Warning,

    /// An operation failed but the surrounding form can continue
    Error,

    /// Configuration or wiring mistake; the component cannot be used
    Critical,
}

impl ErrorSeverity {
    /// Whether this severity indicates a programmer error rather than bad input.
    pub fn is_fatal(self) -> bool {
        matches!(self, ErrorSeverity::Critical)
    }
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ErrorSeverity::Warning => "warning",
            ErrorSeverity::Error => "error",
            ErrorSeverity::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Trait for error types that have severity levels
///
/// # Example
///
/// ```rust
/// use inline_editor_common::{ErrorSeverity, Severity};
///
/// #[derive(Debug)]
/// enum InputError {
///     NotANumber,
///     UnknownKind,
/// }
///
/// impl Severity for InputError {
///     fn severity(&self) -> ErrorSeverity {
///         match self {
///             InputError::NotANumber => ErrorSeverity::Warning,
///             InputError::UnknownKind => ErrorSeverity::Critical,
///         }
///     }
/// }
///
/// assert_eq!(InputError::UnknownKind.severity(), ErrorSeverity::Critical);
/// ```
pub trait Severity {
    /// Get the severity level of this error
    fn severity(&self) -> ErrorSeverity;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(ErrorSeverity::Warning < ErrorSeverity::Error);
        assert!(ErrorSeverity::Error < ErrorSeverity::Critical);
    }

    #[test]
    fn test_only_critical_is_fatal() {
        assert!(!ErrorSeverity::Warning.is_fatal());
        assert!(!ErrorSeverity::Error.is_fatal());
        assert!(ErrorSeverity::Critical.is_fatal());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorSeverity::Warning.to_string(), "warning");
        assert_eq!(ErrorSeverity::Critical.to_string(), "critical");
    }
}
