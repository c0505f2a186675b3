//! Declarative validation for records edited through inline inputs.
//!
//! A [`ModelRecord`] maps field names to a value and an ordered list of
//! [`Constraint`]s. Validating it yields a [`ValidationReport`] holding, for
//! each field, the message of the first constraint it fails.
//!
//! [`User`] is the stock record: every field carries the constraint and
//! message a user-details form shows.

pub mod clock;
pub mod constraint;
pub mod error;
pub mod model;
pub mod user;

pub use clock::{Clock, FixedClock, SystemClock};
pub use constraint::{Constraint, Rule};
pub use error::{Result, ValidationError};
pub use model::{FieldEntry, ModelRecord, ValidationReport};
pub use user::{Gender, User};
