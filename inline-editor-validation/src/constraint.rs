//! Validation constraints attached to model fields.
//!
//! Each constraint pairs a [`Rule`] with the message shown when the rule
//! fails. Null values satisfy every rule except [`Rule::Required`], so an
//! absent optional value is only ever reported as missing.

use chrono::Utc;
use inline_editor_fields::{Value, ValueKind};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;

/// Exactly one `@`, neither first nor last, and no line breaks.
pub const EMAIL_PATTERN: &str = r"^[^@\r\n]+@[^@\r\n]+$";

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));

/// What a constraint checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "kebab-case")]
pub enum Rule {
    /// Not null, and not empty or whitespace-only text.
    Required,
    /// A date-time strictly earlier than now.
    BeforeNow,
    /// The name of a declared member, or a valid member ordinal.
    EnumMember { members: Vec<String> },
    /// A number, or numeric text, within `[min, max]`.
    Range { min: f64, max: f64 },
    /// Text shaped like an email address.
    Email,
    /// Text of at least `min` characters.
    MinLength { min: usize },
}

/// A rule and the message reported when it fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    #[serde(flatten)]
    pub rule: Rule,
    pub message: String,
}

impl Constraint {
    pub fn new(rule: Rule, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
        }
    }

    pub fn required(message: impl Into<String>) -> Self {
        Self::new(Rule::Required, message)
    }

    pub fn before_now(message: impl Into<String>) -> Self {
        Self::new(Rule::BeforeNow, message)
    }

    /// Members are taken from an enumerated kind; other kinds declare none.
    pub fn enum_member(kind: &ValueKind, message: impl Into<String>) -> Self {
        let members = kind.members().iter().map(|m| m.name.clone()).collect();
        Self::new(Rule::EnumMember { members }, message)
    }

    pub fn range(min: f64, max: f64, message: impl Into<String>) -> Self {
        Self::new(Rule::Range { min, max }, message)
    }

    pub fn email(message: impl Into<String>) -> Self {
        Self::new(Rule::Email, message)
    }

    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Self::new(Rule::MinLength { min }, message)
    }

    /// Whether `value` satisfies the rule at the clock's current moment.
    pub fn is_satisfied(&self, value: &Value, clock: &dyn Clock) -> bool {
        if value.is_null() {
            return !matches!(self.rule, Rule::Required);
        }

        match &self.rule {
            Rule::Required => value.as_text().map_or(true, |s| !s.trim().is_empty()),
            Rule::BeforeNow => match value {
                Value::DateTime(dt) => *dt < clock.now_local(),
                Value::DateTimeOffset(dt) => dt.with_timezone(&Utc) < clock.now_utc(),
                _ => false,
            },
            Rule::EnumMember { members } => match value {
                Value::Enum(name) | Value::Text(name) => members.iter().any(|m| m == name),
                Value::Integer(ordinal) => {
                    usize::try_from(*ordinal).is_ok_and(|i| i < members.len())
                }
                _ => false,
            },
            Rule::Range { min, max } => {
                let number = match value {
                    Value::Text(s) => s.trim().parse::<f64>().ok(),
                    other => other.as_f64(),
                };
                number.is_some_and(|n| *min <= n && n <= *max)
            }
            Rule::Email => value.as_text().is_some_and(|s| EMAIL.is_match(s)),
            Rule::MinLength { min } => value
                .as_text()
                .is_some_and(|s| s.chars().count() >= *min),
        }
    }

    /// The failure message, or `None` if `value` satisfies the rule.
    pub fn check(&self, value: &Value, clock: &dyn Clock) -> Option<&str> {
        if self.is_satisfied(value, clock) {
            None
        } else {
            Some(&self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{FixedOffset, NaiveDate, TimeZone};
    use inline_editor_fields::EnumMember;
    use rstest::rstest;

    fn clock() -> FixedClock {
        FixedClock::at_utc(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap())
    }

    fn date(y: i32, m: u32, d: u32) -> Value {
        Value::DateTime(NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap())
    }

    fn gender() -> Constraint {
        let kind = ValueKind::enumeration(
            "Gender",
            vec![
                EnumMember::new("FEMALE"),
                EnumMember::new("MALE"),
                EnumMember::new("DIVERSE"),
            ],
        );
        Constraint::enum_member(&kind, "Please pick valid value")
    }

    #[rstest]
    #[case(Value::Text("Ada".into()), true)]
    #[case(Value::Text("".into()), false)]
    #[case(Value::Text(" \t".into()), false)]
    #[case(Value::Null, false)]
    #[case(Value::Integer(0), true)]
    fn test_required(#[case] value: Value, #[case] ok: bool) {
        assert_eq!(Constraint::required("m").is_satisfied(&value, &clock()), ok);
    }

    #[rstest]
    #[case(date(1990, 1, 1), true)]
    #[case(date(2024, 6, 16), false)]
    #[case(Value::Text("1990-01-01".into()), false)]
    #[case(Value::Null, true)]
    fn test_before_now(#[case] value: Value, #[case] ok: bool) {
        assert_eq!(Constraint::before_now("m").is_satisfied(&value, &clock()), ok);
    }

    #[test]
    fn test_before_now_is_strict() {
        let now = Value::DateTime(clock().now_local());
        assert!(!Constraint::before_now("m").is_satisfied(&now, &clock()));
    }

    #[test]
    fn test_before_now_compares_instants_for_offsets() {
        // 13:30 at +02:00 is 11:30 UTC, before the clock's 12:00 UTC.
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let earlier = offset.with_ymd_and_hms(2024, 6, 15, 13, 30, 0).unwrap();
        let later = offset.with_ymd_and_hms(2024, 6, 15, 14, 30, 0).unwrap();
        let rule = Constraint::before_now("m");
        assert!(rule.is_satisfied(&Value::DateTimeOffset(earlier), &clock()));
        assert!(!rule.is_satisfied(&Value::DateTimeOffset(later), &clock()));
    }

    #[rstest]
    #[case(Value::Enum("FEMALE".into()), true)]
    #[case(Value::Text("DIVERSE".into()), true)]
    #[case(Value::Enum("female".into()), false)]
    #[case(Value::Enum("OTHER".into()), false)]
    #[case(Value::Integer(2), true)]
    #[case(Value::Integer(3), false)]
    #[case(Value::Integer(-1), false)]
    #[case(Value::Double(1.0), false)]
    fn test_enum_member(#[case] value: Value, #[case] ok: bool) {
        assert_eq!(gender().is_satisfied(&value, &clock()), ok);
    }

    #[rstest]
    #[case(Value::Integer(0), true)]
    #[case(Value::Integer(300), true)]
    #[case(Value::Integer(301), false)]
    #[case(Value::Integer(-1), false)]
    #[case(Value::Double(299.5), true)]
    #[case(Value::Float(300.5), false)]
    #[case(Value::Text(" 150 ".into()), true)]
    #[case(Value::Text("tall".into()), false)]
    #[case(Value::Double(f64::NAN), false)]
    fn test_range(#[case] value: Value, #[case] ok: bool) {
        assert_eq!(Constraint::range(0.0, 300.0, "m").is_satisfied(&value, &clock()), ok);
    }

    #[rstest]
    #[case("a@b.com", true)]
    #[case("a@b", true)]
    #[case("not-an-email", false)]
    #[case("@b.com", false)]
    #[case("a@", false)]
    #[case("a@@b.com", false)]
    #[case("a@b@c", false)]
    #[case("a@b\n.com", false)]
    #[case("", false)]
    fn test_email(#[case] text: &str, #[case] ok: bool) {
        let value = Value::Text(text.to_string());
        assert_eq!(Constraint::email("m").is_satisfied(&value, &clock()), ok);
    }

    #[rstest]
    #[case("secret1", true)]
    #[case("secret", true)]
    #[case("abc", false)]
    #[case("ääääää", true)]
    #[case("", false)]
    fn test_min_length(#[case] text: &str, #[case] ok: bool) {
        let value = Value::Text(text.to_string());
        assert_eq!(Constraint::min_length(6, "m").is_satisfied(&value, &clock()), ok);
    }

    #[test]
    fn test_null_passes_all_but_required() {
        let clock = clock();
        for constraint in [
            Constraint::before_now("m"),
            gender(),
            Constraint::range(0.0, 3.0, "m"),
            Constraint::email("m"),
            Constraint::min_length(6, "m"),
        ] {
            assert!(constraint.is_satisfied(&Value::Null, &clock), "{constraint:?}");
        }
    }

    #[test]
    fn test_check_returns_message() {
        let constraint = Constraint::min_length(6, "Please enter 6+ characters");
        assert_eq!(
            constraint.check(&Value::Text("abc".into()), &clock()),
            Some("Please enter 6+ characters")
        );
        assert_eq!(constraint.check(&Value::Text("abcdef".into()), &clock()), None);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(Constraint::range(0.0, 3.0, "m")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "rule": "range", "min": 0.0, "max": 3.0, "message": "m" })
        );
    }
}
