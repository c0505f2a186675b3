//! Invariant text conversion for each value kind.
//!
//! These are the per-kind rules behind `InputAdapter::parse` and
//! `InputAdapter::format`. Parsing returns `None` on any failure; callers
//! turn that into the field's single parse error message.

use std::str::FromStr;

use uuid::Uuid;

use crate::date_format::DateFormat;
use crate::types::{Value, ValueKind};

/// Whitespace permitted around numbers: tab through carriage return, and space.
fn is_number_white(c: char) -> bool {
    matches!(c, '\u{9}'..='\u{d}' | ' ')
}

/// Parse `text` as a value of `kind`. Nullability is the caller's concern.
pub(crate) fn parse_value(kind: &ValueKind, text: &str, dates: &DateFormat) -> Option<Value> {
    match kind {
        ValueKind::Text => Some(Value::Text(text.to_string())),
        ValueKind::Enum { members, .. } => {
            let wanted = text.trim();
            members
                .iter()
                .find(|member| member.matches(wanted))
                .map(|member| Value::Enum(member.name.clone()))
        }
        ValueKind::Integer => parse_integer(text).map(Value::Integer),
        ValueKind::Float => parse_float::<f32>(text).map(Value::Float),
        ValueKind::Double => parse_float::<f64>(text).map(Value::Double),
        ValueKind::Uuid => parse_uuid(text).map(Value::Uuid),
        ValueKind::DateTime => dates.parse_date_time(text).map(Value::DateTime),
        ValueKind::DateTimeOffset => dates.parse_date_time_offset(text).map(Value::DateTimeOffset),
    }
}

/// Render `value` for `kind`. Null and values of another shape render as `""`.
pub(crate) fn format_value(kind: &ValueKind, value: &Value, dates: &DateFormat) -> String {
    match (kind, value) {
        (ValueKind::Text, Value::Text(s)) => s.clone(),
        (ValueKind::Uuid, Value::Uuid(u)) => u.hyphenated().to_string(),
        (ValueKind::Integer, Value::Integer(i)) => i.to_string(),
        (ValueKind::Float, Value::Float(f)) => format_float(f64::from(*f), f.to_string()),
        (ValueKind::Double, Value::Double(d)) => format_float(*d, d.to_string()),
        (ValueKind::Enum { .. }, Value::Enum(name)) if kind.member(name).is_some() => name.clone(),
        (ValueKind::DateTime, Value::DateTime(dt)) => dates.format_date_time(dt),
        (ValueKind::DateTimeOffset, Value::DateTimeOffset(dt)) => {
            dates.format_date_time_offset(dt)
        }
        _ => String::new(),
    }
}

/// Optional surrounding whitespace, optional sign, ASCII digits.
fn parse_integer(text: &str) -> Option<i32> {
    let trimmed = text.trim_matches(is_number_white);
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// Decimal point and exponent notation, or the `NaN`/`Infinity` symbols.
/// Thousands separators and locale decimal commas are rejected; magnitudes
/// beyond the type's range become infinities.
fn parse_float<F>(text: &str) -> Option<F>
where
    F: FromStr + From<SpecialFloat>,
{
    let trimmed = text.trim_matches(is_number_white);
    if let Some(special) = SpecialFloat::from_symbol(trimmed) {
        return Some(F::from(special));
    }
    let numeric = trimmed.bytes().any(|b| b.is_ascii_digit())
        && trimmed
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !numeric {
        return None;
    }
    trimmed.parse().ok()
}

/// The invariant non-finite symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecialFloat {
    NaN,
    Infinity,
    NegativeInfinity,
}

impl SpecialFloat {
    fn from_symbol(trimmed: &str) -> Option<Self> {
        match trimmed.to_ascii_lowercase().as_str() {
            "nan" => Some(SpecialFloat::NaN),
            "infinity" | "+infinity" => Some(SpecialFloat::Infinity),
            "-infinity" => Some(SpecialFloat::NegativeInfinity),
            _ => None,
        }
    }
}

impl From<SpecialFloat> for f64 {
    fn from(special: SpecialFloat) -> Self {
        match special {
            SpecialFloat::NaN => f64::NAN,
            SpecialFloat::Infinity => f64::INFINITY,
            SpecialFloat::NegativeInfinity => f64::NEG_INFINITY,
        }
    }
}

impl From<SpecialFloat> for f32 {
    fn from(special: SpecialFloat) -> Self {
        match special {
            SpecialFloat::NaN => f32::NAN,
            SpecialFloat::Infinity => f32::INFINITY,
            SpecialFloat::NegativeInfinity => f32::NEG_INFINITY,
        }
    }
}

/// Shortest round-trippable numeral, with the invariant special symbols.
fn format_float(value: f64, shortest: String) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        shortest
    }
}

/// Hyphenated, simple, braced, URN, or parenthesized forms.
fn parse_uuid(text: &str) -> Option<Uuid> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed);
    Uuid::try_parse(inner).ok()
}
