//! # Inline Editor Common
//!
//! Foundational pieces shared by the inline editor crates:
//!
//! - [`error`] - severity classification so callers can tell recoverable
//!   input problems apart from wiring mistakes
//! - [`logging`] - YAML pretty-printing for structured log lines and a
//!   subscriber initializer for hosts that have none

pub mod error;
pub mod logging;

pub use error::{ErrorSeverity, Severity};
pub use logging::{init_logging, Pretty};
