//! Core value and type-tag types for input adapters.
//!
//! A [`ValueKind`] names one of the closed set of kinds an adapter can bind
//! to; a [`TypeTag`] adds the nullable wrapper. [`Value`] is the runtime
//! value an adapter holds. All types serialize via serde so form schemas can
//! be declared in YAML or JSON.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FieldsError, Result};

/// A single declared member of an enumerated kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnumMember {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl EnumMember {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
        }
    }

    /// Attach a display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The label shown to users, falling back to the member name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Whether `text` names this member by name or label, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        let wanted = text.to_lowercase();
        self.name.to_lowercase() == wanted
            || self
                .label
                .as_deref()
                .is_some_and(|label| label.to_lowercase() == wanted)
    }
}

/// The kind of value an adapter converts to and from text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ValueKind {
    Text,
    Integer,
    Float,
    Double,
    Uuid,
    Enum {
        name: String,
        members: Vec<EnumMember>,
    },
    DateTime,
    DateTimeOffset,
}

impl ValueKind {
    /// Build an enumerated kind from its type name and members.
    pub fn enumeration(name: impl Into<String>, members: Vec<EnumMember>) -> Self {
        ValueKind::Enum {
            name: name.into(),
            members,
        }
    }

    /// Canonical type name, as accepted by [`TypeTag::resolve`].
    pub fn type_name(&self) -> &str {
        match self {
            ValueKind::Text => "string",
            ValueKind::Integer => "int",
            ValueKind::Float => "float",
            ValueKind::Double => "double",
            ValueKind::Uuid => "guid",
            ValueKind::Enum { name, .. } => name,
            ValueKind::DateTime => "datetime",
            ValueKind::DateTimeOffset => "datetimeoffset",
        }
    }

    /// Whether values of this kind are rendered with the date format.
    pub fn is_temporal(&self) -> bool {
        matches!(self, ValueKind::DateTime | ValueKind::DateTimeOffset)
    }

    /// Declared members for enumerated kinds; empty for everything else.
    pub fn members(&self) -> &[EnumMember] {
        match self {
            ValueKind::Enum { members, .. } => members,
            _ => &[],
        }
    }

    /// Look up an enum member by its exact name.
    pub fn member(&self, name: &str) -> Option<&EnumMember> {
        self.members().iter().find(|m| m.name == name)
    }

    /// The zero value of this kind: empty text, zero, the nil UUID, the
    /// first enum member, or 0001-01-01T00:00.
    pub fn default_value(&self) -> Value {
        match self {
            ValueKind::Text => Value::Text(String::new()),
            ValueKind::Integer => Value::Integer(0),
            ValueKind::Float => Value::Float(0.0),
            ValueKind::Double => Value::Double(0.0),
            ValueKind::Uuid => Value::Uuid(Uuid::nil()),
            ValueKind::Enum { members, .. } => members
                .first()
                .map(|m| Value::Enum(m.name.clone()))
                .unwrap_or(Value::Null),
            ValueKind::DateTime => Value::DateTime(min_date_time()),
            ValueKind::DateTimeOffset => {
                Value::DateTimeOffset(min_date_time().and_utc().fixed_offset())
            }
        }
    }

    fn from_primitive_name(name: &str) -> Option<Self> {
        let kind = match name.to_ascii_lowercase().as_str() {
            "string" | "str" | "text" => ValueKind::Text,
            "int" | "i32" | "int32" | "integer" => ValueKind::Integer,
            "float" | "f32" | "single" => ValueKind::Float,
            "double" | "f64" => ValueKind::Double,
            "guid" | "uuid" => ValueKind::Uuid,
            "datetime" | "naivedatetime" => ValueKind::DateTime,
            "datetimeoffset" => ValueKind::DateTimeOffset,
            _ => return None,
        };
        Some(kind)
    }
}

/// 0001-01-01T00:00, the conventional "unset" date-time.
fn min_date_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .unwrap_or(NaiveDate::MIN)
        .and_time(chrono::NaiveTime::MIN)
}

/// A value kind plus the nullable wrapper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeTag {
    #[serde(flatten)]
    pub kind: ValueKind,
    #[serde(default)]
    pub nullable: bool,
}

impl TypeTag {
    pub fn new(kind: ValueKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    /// The same kind wrapped as nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Resolve a type name such as `"int"`, `"double?"` or `"Gender"`.
    ///
    /// A trailing `?` marks the tag nullable. Enumerated kinds are found by
    /// name among `enums`. Anything else is an unsupported type.
    pub fn resolve(type_name: &str, enums: &[ValueKind]) -> Result<Self> {
        let trimmed = type_name.trim();
        let (base, nullable) = match trimmed.strip_suffix('?') {
            Some(base) => (base.trim_end(), true),
            None => (trimmed, false),
        };

        let kind = ValueKind::from_primitive_name(base).or_else(|| {
            enums
                .iter()
                .find(|kind| matches!(kind, ValueKind::Enum { name, .. } if name == base))
                .cloned()
        });

        match kind {
            Some(kind) => Ok(Self { kind, nullable }),
            None => Err(FieldsError::UnsupportedType {
                type_name: trimmed.to_string(),
            }),
        }
    }

    /// Whether `value` is a legal value for this tag.
    pub fn accepts(&self, value: &Value) -> bool {
        match (&self.kind, value) {
            (_, Value::Null) => self.nullable,
            (ValueKind::Text, Value::Text(_))
            | (ValueKind::Integer, Value::Integer(_))
            | (ValueKind::Float, Value::Float(_))
            | (ValueKind::Double, Value::Double(_))
            | (ValueKind::Uuid, Value::Uuid(_))
            | (ValueKind::DateTime, Value::DateTime(_))
            | (ValueKind::DateTimeOffset, Value::DateTimeOffset(_)) => true,
            (kind @ ValueKind::Enum { .. }, Value::Enum(name)) => kind.member(name).is_some(),
            _ => false,
        }
    }

    /// The value a fresh adapter holds when none is supplied.
    pub fn default_value(&self) -> Value {
        if self.nullable {
            Value::Null
        } else {
            self.kind.default_value()
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind.type_name())?;
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// A bound field value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Value {
    Null,
    Text(String),
    Integer(i32),
    Float(f32),
    Double(f64),
    Uuid(Uuid),
    /// Enum member, stored by its declared name.
    Enum(String),
    DateTime(NaiveDateTime),
    DateTimeOffset(DateTime<FixedOffset>),
}

impl Value {
    /// Short name of the value's shape, used in mismatch errors.
    pub fn shape(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Text(_) => "string",
            Value::Integer(_) => "int",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Uuid(_) => "guid",
            Value::Enum(_) => "enum",
            Value::DateTime(_) => "datetime",
            Value::DateTimeOffset(_) => "datetimeoffset",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of integer and floating-point values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(f64::from(*i)),
            Value::Float(f) => Some(f64::from(*f)),
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Value::Uuid(u)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Value::DateTimeOffset(dt)
    }
}
