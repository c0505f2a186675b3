//! Property-based tests for text conversion.
//!
//! Covers the round trip `parse(format(v)) == v` for every supported kind and
//! the single-message shape of parse failures.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use inline_editor_fields::{EnumMember, FieldsError, InputAdapter, TypeTag, Value, ValueKind};
use proptest::prelude::*;
use uuid::Uuid;

fn adapter(kind: ValueKind) -> InputAdapter {
    InputAdapter::builder("Field", TypeTag::new(kind))
        .build()
        .unwrap()
}

fn adapter_with_format(kind: ValueKind, format: &str) -> InputAdapter {
    InputAdapter::builder("Field", TypeTag::new(kind))
        .date_time_format(format)
        .build()
        .unwrap()
}

fn round_trip(adapter: &InputAdapter, value: Value) -> Value {
    let text = adapter.format(&value);
    adapter.parse(&text).unwrap()
}

/// Minute-aligned date-times between 1900 and 2100.
fn minute_date_time() -> impl Strategy<Value = NaiveDateTime> {
    (1900i32..2100, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60).prop_map(|(y, mo, d, h, mi)| {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    })
}

/// Second-precision date-times with a quarter-hour offset.
fn offset_date_time() -> impl Strategy<Value = DateTime<FixedOffset>> {
    (1900i32..2100, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60, -48i32..=56).prop_map(
        |(y, mo, d, h, mi, s, quarters)| {
            FixedOffset::east_opt(quarters * 15 * 60)
                .unwrap()
                .with_ymd_and_hms(y, mo, d, h, mi, s)
                .unwrap()
        },
    )
}

fn gender() -> ValueKind {
    ValueKind::enumeration(
        "Gender",
        vec![
            EnumMember::new("FEMALE").with_label("Female"),
            EnumMember::new("MALE").with_label("Male"),
            EnumMember::new("DIVERSE").with_label("Diverse"),
        ],
    )
}

proptest! {
    #[test]
    fn integers_round_trip(i in any::<i32>()) {
        let adapter = adapter(ValueKind::Integer);
        prop_assert_eq!(round_trip(&adapter, Value::Integer(i)), Value::Integer(i));
    }

    #[test]
    fn doubles_round_trip(d in any::<f64>().prop_filter("NaN never equals itself", |d| !d.is_nan())) {
        let adapter = adapter(ValueKind::Double);
        prop_assert_eq!(round_trip(&adapter, Value::Double(d)), Value::Double(d));
    }

    #[test]
    fn floats_round_trip(f in any::<f32>().prop_filter("NaN never equals itself", |f| !f.is_nan())) {
        let adapter = adapter(ValueKind::Float);
        prop_assert_eq!(round_trip(&adapter, Value::Float(f)), Value::Float(f));
    }

    #[test]
    fn uuids_round_trip(bytes in any::<[u8; 16]>()) {
        let id = Uuid::from_bytes(bytes);
        let adapter = adapter(ValueKind::Uuid);
        prop_assert_eq!(round_trip(&adapter, Value::Uuid(id)), Value::Uuid(id));
    }

    #[test]
    fn text_round_trips_and_is_always_accepted(s in ".*") {
        let adapter = adapter(ValueKind::Text);
        prop_assert_eq!(adapter.parse(&s).unwrap(), Value::Text(s.clone()));
        prop_assert_eq!(round_trip(&adapter, Value::Text(s.clone())), Value::Text(s));
    }

    #[test]
    fn enums_round_trip(index in 0usize..3) {
        let kind = gender();
        let name = kind.members()[index].name.clone();
        let adapter = adapter(kind);
        prop_assert_eq!(round_trip(&adapter, Value::Enum(name.clone())), Value::Enum(name));
    }

    #[test]
    fn date_times_round_trip_at_minute_precision(dt in minute_date_time()) {
        let adapter = adapter(ValueKind::DateTime);
        prop_assert_eq!(round_trip(&adapter, Value::DateTime(dt)), Value::DateTime(dt));
    }

    #[test]
    fn date_time_offsets_round_trip_with_offset_format(dt in offset_date_time()) {
        let adapter = adapter_with_format(ValueKind::DateTimeOffset, "yyyy-MM-ddTHH:mm:sszzz");
        let back = round_trip(&adapter, Value::DateTimeOffset(dt));
        prop_assert_eq!(&back, &Value::DateTimeOffset(dt));
        if let Value::DateTimeOffset(parsed) = back {
            prop_assert_eq!(parsed.offset(), dt.offset());
        }
    }

    #[test]
    fn malformed_text_shares_one_message(junk in "[g-mo-zG-MO-Z,;#]{1,12}") {
        for kind in [ValueKind::Integer, ValueKind::Double, ValueKind::Uuid, ValueKind::DateTime] {
            let adapter = adapter(kind);
            let err = adapter.parse(&junk).unwrap_err();
            prop_assert_eq!(err.clone(), FieldsError::ParseFailed { field: "Field".into() });
            prop_assert_eq!(err.to_string(), "The field 'Field' could not be parsed.");
        }
    }
}

#[test]
fn seconds_are_lost_by_the_default_format() {
    let adapter = adapter(ValueKind::DateTime);
    let value = NaiveDate::from_ymd_opt(2021, 5, 6)
        .unwrap()
        .and_hms_opt(7, 8, 9)
        .unwrap();
    let back = round_trip(&adapter, Value::DateTime(value));
    assert_eq!(
        back,
        Value::DateTime(NaiveDate::from_ymd_opt(2021, 5, 6).unwrap().and_hms_opt(7, 8, 0).unwrap())
    );
}

#[test]
fn offsets_are_read_back_as_utc_by_the_default_format() {
    let adapter = adapter(ValueKind::DateTimeOffset);
    let plus_two = FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2022, 6, 1, 10, 0, 0)
        .unwrap();

    let text = adapter.format(&Value::DateTimeOffset(plus_two));
    assert_eq!(text, "2022-06-01T10:00");

    let back = adapter.parse(&text).unwrap();
    let utc = FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2022, 6, 1, 10, 0, 0)
        .unwrap();
    assert_eq!(back, Value::DateTimeOffset(utc));
    assert_ne!(back, Value::DateTimeOffset(plus_two));
}
