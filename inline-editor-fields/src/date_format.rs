//! Date-time display formats.
//!
//! Formats are written with the custom specifiers form designers already
//! know (`yyyy-MM-ddTHH:mm`, `dd.MM.yyyy HH:mm:ss`, ...) and compiled once
//! into a chrono strftime string. Parsing is exact: the text must match the
//! whole format, with invariant (English) month and day names.

use std::fmt::Write as _;

use chrono::format::{self, Item, Parsed, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{FieldsError, Result};

/// Display format used when none is configured.
pub const DEFAULT_DATE_TIME_FORMAT: &str = "yyyy-MM-ddTHH:mm";

/// A compiled date-time display format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateFormat {
    pattern: String,
    strftime: String,
    has_time: bool,
    has_offset: bool,
}

/// Which date-time components a pattern names.
#[derive(Debug, Default)]
struct Components {
    year: bool,
    month: bool,
    day: bool,
    hour24: bool,
    hour12: bool,
    minute: bool,
    am_pm: bool,
    offset: bool,
}

impl DateFormat {
    /// Compile a display format.
    ///
    /// The format must name year, month and day. If it names hours it must
    /// name minutes, and 12-hour clocks need an AM/PM designator.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let (strftime, parts) = translate(&pattern)?;

        if !(parts.year && parts.month && parts.day) {
            return Err(FieldsError::invalid_format(
                &pattern,
                "must include year, month and day",
            ));
        }
        let has_hour = parts.hour24 || parts.hour12;
        if has_hour != parts.minute {
            return Err(FieldsError::invalid_format(
                &pattern,
                "hours and minutes must appear together",
            ));
        }
        if parts.hour12 && !parts.am_pm {
            return Err(FieldsError::invalid_format(
                &pattern,
                "12-hour clock needs an AM/PM designator (tt)",
            ));
        }
        if StrftimeItems::new(&strftime).any(|item| matches!(item, Item::Error)) {
            return Err(FieldsError::invalid_format(&pattern, "unsupported layout"));
        }

        Ok(Self {
            pattern,
            strftime,
            has_time: has_hour,
            has_offset: parts.offset,
        })
    }

    /// The format as written.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The equivalent chrono strftime string.
    pub fn strftime(&self) -> &str {
        &self.strftime
    }

    /// Whether the format carries a time of day. Date-only formats parse to midnight.
    pub fn has_time(&self) -> bool {
        self.has_time
    }

    /// Whether the format carries a UTC offset.
    pub fn has_offset(&self) -> bool {
        self.has_offset
    }

    /// Parse a local date-time. An offset in the text, if any, is ignored.
    pub fn parse_date_time(&self, text: &str) -> Option<NaiveDateTime> {
        if self.has_offset {
            return self
                .parse_date_time_offset(text)
                .map(|value| value.naive_local());
        }
        let naive = self.naive_from(&self.parse_fields(text)?)?;
        is_rendering_of(text, &render(naive.format(&self.strftime))).then_some(naive)
    }

    /// Parse a date-time with offset. Formats without `zzz` read as UTC.
    pub fn parse_date_time_offset(&self, text: &str) -> Option<DateTime<FixedOffset>> {
        let parsed = self.parse_fields(text)?;
        let naive = self.naive_from(&parsed)?;
        let offset = if self.has_offset {
            parsed.to_fixed_offset().ok()?
        } else {
            FixedOffset::east_opt(0)?
        };
        let value = naive.and_local_timezone(offset).single()?;
        is_rendering_of(text, &self.format_date_time_offset(&value)).then_some(value)
    }

    /// Render a local date-time. Offsets in the format render as `+00:00`.
    pub fn format_date_time(&self, value: &NaiveDateTime) -> String {
        if self.has_offset {
            render(value.and_utc().fixed_offset().format(&self.strftime))
        } else {
            render(value.format(&self.strftime))
        }
    }

    /// Render a date-time with offset in its own offset.
    pub fn format_date_time_offset(&self, value: &DateTime<FixedOffset>) -> String {
        render(value.format(&self.strftime))
    }

    fn parse_fields(&self, text: &str) -> Option<Parsed> {
        let mut parsed = Parsed::default();
        format::parse(&mut parsed, text, StrftimeItems::new(&self.strftime)).ok()?;
        Some(parsed)
    }

    fn naive_from(&self, parsed: &Parsed) -> Option<NaiveDateTime> {
        let date = parsed.to_naive_date().ok()?;
        let time = if self.has_time {
            parsed.to_naive_time().ok()?
        } else {
            NaiveTime::MIN
        };
        Some(date.and_time(time))
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_TIME_FORMAT.to_string(),
            strftime: "%Y-%m-%dT%H:%M".to_string(),
            has_time: true,
            has_offset: false,
        }
    }
}

impl TryFrom<String> for DateFormat {
    type Error = FieldsError;

    fn try_from(pattern: String) -> Result<Self> {
        DateFormat::new(pattern)
    }
}

impl From<DateFormat> for String {
    fn from(format: DateFormat) -> Self {
        format.pattern
    }
}

impl std::fmt::Display for DateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// Write a chrono display into a string; a formatting failure yields `""`.
fn render(display: impl std::fmt::Display) -> String {
    let mut out = String::new();
    if write!(out, "{display}").is_err() {
        return String::new();
    }
    out
}

/// chrono skips whitespace before numbers, so a successful parse alone is not
/// an exact match. The text must also be what the format renders for the
/// parsed value, up to ASCII case in names and designators.
fn is_rendering_of(text: &str, rendered: &str) -> bool {
    !rendered.is_empty() && text.eq_ignore_ascii_case(rendered)
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

/// Translate custom specifiers into strftime, noting which components appear.
fn translate(pattern: &str) -> Result<(String, Components)> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut parts = Components::default();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\'' | '"' => {
                let close = chars[i + 1..]
                    .iter()
                    .position(|&q| q == c)
                    .ok_or_else(|| FieldsError::invalid_format(pattern, "unterminated quote"))?;
                for &lit in &chars[i + 1..i + 1 + close] {
                    push_literal(&mut out, lit);
                }
                i += close + 2;
                continue;
            }
            '\\' => {
                let lit = chars
                    .get(i + 1)
                    .ok_or_else(|| FieldsError::invalid_format(pattern, "trailing escape"))?;
                push_literal(&mut out, *lit);
                i += 2;
                continue;
            }
            // `%d` means the single specifier `d`
            '%' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let run = chars[i..].iter().take_while(|&&r| r == c).count();
        let spec = match c {
            'y' => {
                parts.year = true;
                match run {
                    1 => "%-y",
                    2 => "%y",
                    _ => "%Y",
                }
            }
            'M' => {
                parts.month = true;
                match run {
                    1 => "%-m",
                    2 => "%m",
                    3 => "%b",
                    _ => "%B",
                }
            }
            'd' => match run {
                1 => {
                    parts.day = true;
                    "%-d"
                }
                2 => {
                    parts.day = true;
                    "%d"
                }
                3 => "%a",
                _ => "%A",
            },
            'H' => {
                parts.hour24 = true;
                if run == 1 {
                    "%-H"
                } else {
                    "%H"
                }
            }
            'h' => {
                parts.hour12 = true;
                if run == 1 {
                    "%-I"
                } else {
                    "%I"
                }
            }
            'm' => {
                parts.minute = true;
                if run == 1 {
                    "%-M"
                } else {
                    "%M"
                }
            }
            's' => {
                if run == 1 {
                    "%-S"
                } else {
                    "%S"
                }
            }
            'f' => match run {
                3 => "%3f",
                6 => "%6f",
                9 => "%9f",
                _ => {
                    return Err(FieldsError::invalid_format(
                        pattern,
                        "fractional seconds must be fff, ffffff or fffffffff",
                    ))
                }
            },
            't' => {
                parts.am_pm = true;
                "%p"
            }
            'z' => {
                if run != 3 {
                    return Err(FieldsError::invalid_format(
                        pattern,
                        "offsets must be written as zzz",
                    ));
                }
                parts.offset = true;
                "%:z"
            }
            'F' | 'K' | 'g' => {
                return Err(FieldsError::invalid_format(
                    pattern,
                    format!("unsupported specifier '{c}'"),
                ))
            }
            _ => {
                for _ in 0..run {
                    push_literal(&mut out, c);
                }
                i += run;
                continue;
            }
        };
        out.push_str(spec);
        i += run;
    }

    Ok((out, parts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn default_matches_compiled_default_pattern() {
        let compiled = DateFormat::new(DEFAULT_DATE_TIME_FORMAT).unwrap();
        assert_eq!(compiled, DateFormat::default());
        assert_eq!(compiled.strftime(), "%Y-%m-%dT%H:%M");
    }

    #[test]
    fn default_format_parses_and_formats() {
        let format = DateFormat::default();
        assert_eq!(
            format.parse_date_time("2024-03-05T14:30"),
            Some(dt(2024, 3, 5, 14, 30, 0))
        );
        assert_eq!(
            format.format_date_time(&dt(2024, 3, 5, 14, 30, 59)),
            "2024-03-05T14:30"
        );
    }

    #[test]
    fn parsing_is_exact() {
        let format = DateFormat::default();
        assert_eq!(format.parse_date_time("2024-03-05"), None);
        assert_eq!(format.parse_date_time("2024-03-05T14:30:00"), None);
        assert_eq!(format.parse_date_time("2024-13-05T14:30"), None);
        assert_eq!(format.parse_date_time(""), None);
        assert_eq!(format.parse_date_time(" 2024-03-05T14:30"), None);
        assert_eq!(format.parse_date_time("2024- 03-05T14:30"), None);
        assert_eq!(format.parse_date_time("2024-03-05T 14:30"), None);
        assert_eq!(format.parse_date_time("2024-03-05T14:30 "), None);
        assert_eq!(format.parse_date_time_offset("2024-03-05T14: 30"), None);
    }

    #[test]
    fn names_and_designators_ignore_case() {
        let format = DateFormat::new("dd MMM yyyy hh:mm tt").unwrap();
        assert_eq!(
            format.parse_date_time("05 mar 2024 02:30 pm"),
            Some(dt(2024, 3, 5, 14, 30, 0))
        );
        assert_eq!(format.parse_date_time("05  Mar 2024 02:30 PM"), None);
    }

    #[test]
    fn offset_text_must_be_exact() {
        let format = DateFormat::new("yyyy-MM-ddTHH:mmzzz").unwrap();
        assert_eq!(
            format.parse_date_time("2024-03-05T14:30+02:00"),
            Some(dt(2024, 3, 5, 14, 30, 0))
        );
        assert_eq!(format.parse_date_time("2024-03-05T14:30 +02:00"), None);
        assert!(format.parse_date_time_offset("2024-03-05T 14:30+02:00").is_none());
    }

    #[test]
    fn date_only_format_parses_to_midnight() {
        let format = DateFormat::new("dd.MM.yyyy").unwrap();
        assert!(!format.has_time());
        assert_eq!(
            format.parse_date_time("24.12.1990"),
            Some(dt(1990, 12, 24, 0, 0, 0))
        );
        assert_eq!(format.format_date_time(&dt(1990, 12, 24, 8, 0, 0)), "24.12.1990");
    }

    #[test]
    fn quoted_and_escaped_literals() {
        let format = DateFormat::new("yyyy'y'MM\\mdd HH:mm").unwrap();
        assert_eq!(format.strftime(), "%Yy%mm%d %H:%M");
        assert_eq!(format.format_date_time(&dt(2020, 1, 2, 3, 4, 0)), "2020y01m02 03:04");
    }

    #[test]
    fn percent_literal_is_escaped() {
        let format = DateFormat::new("yyyy-MM-dd '100%'").unwrap();
        assert_eq!(format.format_date_time(&dt(2020, 1, 2, 0, 0, 0)), "2020-01-02 100%");
    }

    #[test]
    fn twelve_hour_clock_with_designator() {
        let format = DateFormat::new("MM/dd/yyyy hh:mm tt").unwrap();
        assert_eq!(
            format.parse_date_time("07/04/2021 09:15 PM"),
            Some(dt(2021, 7, 4, 21, 15, 0))
        );
        assert_eq!(
            format.format_date_time(&dt(2021, 7, 4, 9, 15, 0)),
            "07/04/2021 09:15 AM"
        );
    }

    #[test]
    fn offset_format_round_trips_offset() {
        let format = DateFormat::new("yyyy-MM-ddTHH:mm:sszzz").unwrap();
        let value = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2022, 6, 1, 10, 0, 5)
            .unwrap();
        let text = format.format_date_time_offset(&value);
        assert_eq!(text, "2022-06-01T10:00:05+02:00");
        assert_eq!(format.parse_date_time_offset(&text), Some(value));
    }

    #[test]
    fn offset_defaults_to_utc_when_format_has_none() {
        let format = DateFormat::default();
        let parsed = format.parse_date_time_offset("2022-06-01T10:00").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 0);
    }

    #[test]
    fn naive_value_in_offset_format_renders_utc() {
        let format = DateFormat::new("yyyy-MM-dd HH:mm zzz").unwrap();
        assert_eq!(
            format.format_date_time(&dt(2022, 6, 1, 10, 0, 0)),
            "2022-06-01 10:00 +00:00"
        );
    }

    #[test]
    fn fractional_seconds() {
        let format = DateFormat::new("yyyy-MM-dd HH:mm:ss.fff").unwrap();
        let value = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_milli_opt(12, 0, 0, 250)
            .unwrap();
        let text = format.format_date_time(&value);
        assert_eq!(text, "2023-01-01 12:00:00.250");
        assert_eq!(format.parse_date_time(&text), Some(value));
    }

    #[test]
    fn rejects_incomplete_or_unsupported_formats() {
        assert!(DateFormat::new("HH:mm").is_err());
        assert!(DateFormat::new("yyyy-MM").is_err());
        assert!(DateFormat::new("yyyy-MM-dd HH").is_err());
        assert!(DateFormat::new("yyyy-MM-dd hh:mm").is_err());
        assert!(DateFormat::new("yyyy-MM-dd HH:mm:ss.ff").is_err());
        assert!(DateFormat::new("yyyy-MM-dd HH:mm z").is_err());
        assert!(DateFormat::new("yyyy-MM-dd 'open").is_err());
        assert!(DateFormat::new("yyyy-MM-dd K").is_err());
    }

    #[test]
    fn serde_uses_pattern_string() {
        let format = DateFormat::new("dd.MM.yyyy").unwrap();
        let json = serde_json::to_string(&format).unwrap();
        assert_eq!(json, "\"dd.MM.yyyy\"");
        let back: DateFormat = serde_json::from_str(&json).unwrap();
        assert_eq!(back, format);
        assert!(serde_json::from_str::<DateFormat>("\"HH:mm\"").is_err());
    }
}
