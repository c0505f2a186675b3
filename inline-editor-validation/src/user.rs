//! The user-details record.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use inline_editor_fields::{enum_input_value, EnumValue, InputValue, TypeTag, Value};

use crate::clock::Clock;
use crate::constraint::Constraint;
use crate::error::{Result, ValidationError};
use crate::model::{ModelRecord, ValidationReport};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Gender {
    #[default]
    Female,
    Male,
    Diverse,
}

impl EnumValue for Gender {
    const TYPE_NAME: &'static str = "Gender";

    fn variants() -> &'static [Self] {
        &[Gender::Female, Gender::Male, Gender::Diverse]
    }

    fn name(self) -> &'static str {
        match self {
            Gender::Female => "FEMALE",
            Gender::Male => "MALE",
            Gender::Diverse => "DIVERSE",
        }
    }

    fn label(self) -> Option<&'static str> {
        Some(match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
            Gender::Diverse => "Diverse",
        })
    }
}

enum_input_value!(Gender);

/// A person's details, as shown in the inline editor.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub name: String,
    pub birthday: NaiveDateTime,
    pub gender: Gender,
    pub height_in_centimeters: i32,
    pub height_in_meters: f64,
    pub email: String,
    pub password: String,
}

impl Default for User {
    fn default() -> Self {
        Self {
            name: String::new(),
            birthday: NaiveDate::from_ymd_opt(1, 1, 1)
                .unwrap_or(NaiveDate::MIN)
                .and_time(NaiveTime::MIN),
            gender: Gender::default(),
            height_in_centimeters: 0,
            height_in_meters: 0.0,
            email: String::new(),
            password: String::new(),
        }
    }
}

impl User {
    pub const NAME: &'static str = "Name";
    pub const BIRTHDAY: &'static str = "Birthday";
    pub const GENDER: &'static str = "Gender";
    pub const HEIGHT_IN_CENTIMETERS: &'static str = "HeightInCentimeters";
    pub const HEIGHT_IN_METERS: &'static str = "HeightInMeters";
    pub const EMAIL: &'static str = "Email";
    pub const PASSWORD: &'static str = "Password";

    /// Field names in display order.
    pub const FIELDS: [&'static str; 7] = [
        Self::NAME,
        Self::BIRTHDAY,
        Self::GENDER,
        Self::HEIGHT_IN_CENTIMETERS,
        Self::HEIGHT_IN_METERS,
        Self::EMAIL,
        Self::PASSWORD,
    ];

    /// Constraints declared for `field`.
    pub fn constraints(field: &str) -> Result<Vec<Constraint>> {
        let constraints = match field {
            Self::NAME => vec![Constraint::required("Please enter Name")],
            Self::BIRTHDAY => vec![Constraint::before_now("Please pick date it the past")],
            Self::GENDER => vec![Constraint::enum_member(
                &Gender::kind(),
                "Please pick valid value",
            )],
            Self::HEIGHT_IN_CENTIMETERS => vec![Constraint::range(
                0.0,
                300.0,
                "Please enter size between 0 and 300cm",
            )],
            Self::HEIGHT_IN_METERS => vec![Constraint::range(
                0.0,
                3.0,
                "Please enter size between 0 and 3m",
            )],
            Self::EMAIL => vec![Constraint::email("Please enter valid email address")],
            Self::PASSWORD => vec![Constraint::min_length(6, "Please enter 6+ characters")],
            _ => return Err(unknown(field)),
        };
        Ok(constraints)
    }

    /// The type tag an input bound to `field` uses.
    pub fn type_tag(field: &str) -> Result<TypeTag> {
        let tag = match field {
            Self::NAME | Self::EMAIL | Self::PASSWORD => String::type_tag(),
            Self::BIRTHDAY => NaiveDateTime::type_tag(),
            Self::GENDER => Gender::type_tag(),
            Self::HEIGHT_IN_CENTIMETERS => i32::type_tag(),
            Self::HEIGHT_IN_METERS => f64::type_tag(),
            _ => return Err(unknown(field)),
        };
        Ok(tag)
    }

    /// The current value of `field`.
    pub fn value(&self, field: &str) -> Result<Value> {
        let value = match field {
            Self::NAME => self.name.clone().into_value(),
            Self::BIRTHDAY => self.birthday.into_value(),
            Self::GENDER => self.gender.into_value(),
            Self::HEIGHT_IN_CENTIMETERS => self.height_in_centimeters.into_value(),
            Self::HEIGHT_IN_METERS => self.height_in_meters.into_value(),
            Self::EMAIL => self.email.clone().into_value(),
            Self::PASSWORD => self.password.clone().into_value(),
            _ => return Err(unknown(field)),
        };
        Ok(value)
    }

    /// Write a parsed value back to `field`.
    pub fn apply(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            Self::NAME => self.name = typed(field, value)?,
            Self::BIRTHDAY => self.birthday = typed(field, value)?,
            Self::GENDER => self.gender = typed(field, value)?,
            Self::HEIGHT_IN_CENTIMETERS => self.height_in_centimeters = typed(field, value)?,
            Self::HEIGHT_IN_METERS => self.height_in_meters = typed(field, value)?,
            Self::EMAIL => self.email = typed(field, value)?,
            Self::PASSWORD => self.password = typed(field, value)?,
            _ => return Err(unknown(field)),
        }
        Ok(())
    }

    /// The user as a model record, one entry per field.
    pub fn to_record(&self) -> Result<ModelRecord> {
        let mut record = ModelRecord::new();
        for field in Self::FIELDS {
            record.insert(field, self.value(field)?, Self::constraints(field)?);
        }
        Ok(record)
    }

    pub fn validate(&self, clock: &dyn Clock) -> Result<ValidationReport> {
        Ok(self.to_record()?.validate(clock))
    }
}

fn unknown(field: &str) -> ValidationError {
    ValidationError::UnknownField {
        field: field.to_string(),
    }
}

fn typed<T: InputValue>(field: &str, value: Value) -> Result<T> {
    let found = value.shape();
    T::from_value(value).ok_or_else(|| ValidationError::ValueMismatch {
        field: field.to_string(),
        expected: T::type_tag().to_string(),
        found: found.to_string(),
    })
}
