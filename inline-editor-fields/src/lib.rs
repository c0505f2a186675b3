//! Typed inline-editing inputs
//!
//! `inline-editor-fields` converts between the text a user types into an
//! inline input and the strongly typed value of the field it is bound to.
//!
//! # Architecture
//!
//! - **Closed set of kinds**: [`ValueKind`] lists every supported kind; parse
//!   and format are exhaustive matches over it
//! - **Fail fast on wiring mistakes**: unknown type names and unusable date
//!   formats are rejected when the adapter is built, never per keystroke
//! - **One parse message per field**: every parse failure reads
//!   `The field '<name>' could not be parsed.`
//! - **Reset snapshot**: the value an adapter is built with can be restored
//!   at any time
//! - **Invariant formatting**: numbers and dates render the same regardless
//!   of the user's locale

pub mod adapter;
mod convert;
pub mod date_format;
pub mod editor;
pub mod error;
pub mod typed;
pub mod types;

pub use adapter::{InputAdapter, InputAdapterBuilder};
pub use date_format::{DateFormat, DEFAULT_DATE_TIME_FORMAT};
pub use editor::{EditMode, InlineEditor, InputId, Registration};
pub use error::{FieldsError, Result};
pub use typed::{EnumValue, InputValue, TypedInput};
pub use types::{EnumMember, TypeTag, Value, ValueKind};
