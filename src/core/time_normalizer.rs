use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::{Number, Value};

use crate::core::CalendarMoment;
use crate::error::{ScaleError, ScaleResult};

/// Formats tried in order when no explicit date format is configured.
const DEFAULT_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];
const DEFAULT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Time zone applied to epoch-millisecond values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoneStrategy {
    /// Use the zone of the host system.
    #[default]
    SystemLocal,
    /// Shift by a fixed number of seconds and read the result as UTC wall time.
    Forced { offset_seconds: i64 },
}

impl ZoneStrategy {
    /// A zero offset means "no override".
    #[must_use]
    pub fn from_offset_seconds(offset_seconds: i64) -> Self {
        if offset_seconds == 0 {
            Self::SystemLocal
        } else {
            Self::Forced { offset_seconds }
        }
    }
}

/// Parser used for textual date values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TextDateStrategy {
    /// RFC 3339 followed by a fixed list of common layouts.
    #[default]
    CommonFormats,
    /// Strict `chrono` format string.
    Pattern(String),
}

impl TextDateStrategy {
    /// Empty or missing formats fall back to the common layouts.
    #[must_use]
    pub fn from_optional_format(format: Option<&str>) -> Self {
        match format {
            Some(format) if !format.trim().is_empty() => Self::Pattern(format.to_owned()),
            _ => Self::CommonFormats,
        }
    }

    fn parse(&self, text: &str) -> Option<NaiveDateTime> {
        match self {
            Self::Pattern(format) => parse_with_format(text, format),
            Self::CommonFormats => parse_common(text.trim()),
        }
    }
}

/// Converts raw point values into [`CalendarMoment`]s.
///
/// Strings are dates, numbers are epoch milliseconds. Both strategies are fixed
/// when the normalizer is built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimeNormalizer {
    zone: ZoneStrategy,
    text: TextDateStrategy,
}

impl TimeNormalizer {
    #[must_use]
    pub fn new(zone: ZoneStrategy, text: TextDateStrategy) -> Self {
        Self { zone, text }
    }

    #[must_use]
    pub fn zone(&self) -> ZoneStrategy {
        self.zone
    }

    #[must_use]
    pub fn text_strategy(&self) -> &TextDateStrategy {
        &self.text
    }

    /// Normalizes the value found at `index` of the scale's sequence.
    pub fn normalize(&self, index: usize, value: &Value) -> ScaleResult<CalendarMoment> {
        match value {
            Value::String(text) => self
                .text
                .parse(text)
                .map(CalendarMoment::from_naive)
                .ok_or_else(|| ScaleError::DateParse {
                    index,
                    input: text.clone(),
                    reason: match &self.text {
                        TextDateStrategy::Pattern(format) => {
                            format!("does not match format `{format}`")
                        }
                        TextDateStrategy::CommonFormats => {
                            "does not match any supported date layout".to_owned()
                        }
                    },
                }),
            Value::Number(number) => self.normalize_timestamp(index, number),
            other => Err(ScaleError::UnsupportedValueKind {
                index,
                kind: value_kind(other),
            }),
        }
    }

    fn normalize_timestamp(&self, index: usize, number: &Number) -> ScaleResult<CalendarMoment> {
        let out_of_range = |reason: &str| ScaleError::DateParse {
            index,
            input: number.to_string(),
            reason: reason.to_owned(),
        };

        let millis = epoch_millis(number)
            .ok_or_else(|| out_of_range("not a representable millisecond timestamp"))?;

        match self.zone {
            ZoneStrategy::SystemLocal => {
                let utc = DateTime::<Utc>::from_timestamp_millis(millis)
                    .ok_or_else(|| out_of_range("timestamp out of range"))?;
                Ok(CalendarMoment::from_naive(
                    utc.with_timezone(&Local).naive_local(),
                ))
            }
            ZoneStrategy::Forced { offset_seconds } => {
                let shifted = offset_seconds
                    .checked_mul(1_000)
                    .and_then(|offset_millis| millis.checked_add(offset_millis))
                    .ok_or_else(|| out_of_range("timestamp overflows with zone offset"))?;
                let utc = DateTime::<Utc>::from_timestamp_millis(shifted)
                    .ok_or_else(|| out_of_range("timestamp out of range"))?;
                Ok(CalendarMoment::from_naive(utc.naive_utc()))
            }
        }
    }
}

fn epoch_millis(number: &Number) -> Option<i64> {
    if let Some(millis) = number.as_i64() {
        return Some(millis);
    }
    let raw = number.as_f64()?;
    if !raw.is_finite() {
        return None;
    }
    let truncated = raw.trunc();
    if truncated > (i64::MAX as f64) || truncated < (i64::MIN as f64) {
        return None;
    }
    Some(truncated as i64)
}

fn parse_with_format(text: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, format)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

fn parse_common(text: &str) -> Option<NaiveDateTime> {
    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Some(time.naive_local());
    }

    DEFAULT_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DEFAULT_DATE_FORMATS.iter().find_map(|format| {
                NaiveDate::parse_from_str(text, format)
                    .ok()
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
        })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Local, Utc};
    use serde_json::json;

    use super::{TextDateStrategy, TimeNormalizer, ZoneStrategy};
    use crate::core::CalendarMoment;
    use crate::error::ScaleError;

    fn forced(offset_seconds: i64) -> TimeNormalizer {
        TimeNormalizer::new(
            ZoneStrategy::from_offset_seconds(offset_seconds),
            TextDateStrategy::CommonFormats,
        )
    }

    #[test]
    fn common_layouts_are_accepted() {
        let normalizer = TimeNormalizer::default();
        let cases = [
            ("2024-03-01 09:30:15", CalendarMoment::new(2024, 3, 1, 9, 30, 15)),
            ("2024-03-01 09:30", CalendarMoment::new(2024, 3, 1, 9, 30, 0)),
            ("2024-03-01T09:30:00", CalendarMoment::new(2024, 3, 1, 9, 30, 0)),
            ("2024/03/01 09:30", CalendarMoment::new(2024, 3, 1, 9, 30, 0)),
            ("2024-03-01", CalendarMoment::new(2024, 3, 1, 0, 0, 0)),
            ("2024/03/01", CalendarMoment::new(2024, 3, 1, 0, 0, 0)),
            ("2024-03-01T09:30:00+08:00", CalendarMoment::new(2024, 3, 1, 9, 30, 0)),
        ];

        for (text, expected) in cases {
            let moment = normalizer.normalize(0, &json!(text)).expect(text);
            assert_eq!(moment, expected, "{text}");
        }
    }

    #[test]
    fn explicit_pattern_is_strict() {
        let normalizer = TimeNormalizer::new(
            ZoneStrategy::SystemLocal,
            TextDateStrategy::from_optional_format(Some("%d.%m.%Y")),
        );
        let moment = normalizer.normalize(0, &json!("05.02.2023")).expect("parse");
        assert_eq!(moment, CalendarMoment::new(2023, 2, 5, 0, 0, 0));

        let err = normalizer
            .normalize(4, &json!("2023-02-05"))
            .expect_err("layout mismatch");
        assert!(matches!(err, ScaleError::DateParse { index: 4, .. }));

        let err = normalizer
            .normalize(1, &json!(" 05.02.2023 "))
            .expect_err("padding is not part of the format");
        assert!(matches!(err, ScaleError::DateParse { index: 1, .. }));
    }

    #[test]
    fn common_layouts_ignore_surrounding_whitespace() {
        let moment = TimeNormalizer::default()
            .normalize(0, &json!("  2024-03-01  "))
            .expect("trimmed");
        assert_eq!(moment, CalendarMoment::new(2024, 3, 1, 0, 0, 0));
    }

    #[test]
    fn empty_format_falls_back_to_common_layouts() {
        assert_eq!(
            TextDateStrategy::from_optional_format(Some("  ")),
            TextDateStrategy::CommonFormats
        );
        assert_eq!(
            TextDateStrategy::from_optional_format(None),
            TextDateStrategy::CommonFormats
        );
    }

    #[test]
    fn garbage_text_is_a_parse_error() {
        let err = TimeNormalizer::default()
            .normalize(2, &json!("not a date"))
            .expect_err("must fail");
        assert!(matches!(err, ScaleError::DateParse { index: 2, .. }));
    }

    #[test]
    fn forced_offset_shifts_timestamp_before_conversion() {
        // 2024-01-31T20:00:00Z
        let millis = 1_706_731_200_000_i64;
        let utc = forced(60).normalize(0, &json!(millis)).expect("ok");
        assert_eq!(utc, CalendarMoment::new(2024, 1, 31, 20, 1, 0));

        let east = forced(8 * 3600).normalize(0, &json!(millis)).expect("ok");
        assert_eq!(east, CalendarMoment::new(2024, 2, 1, 4, 0, 0));
    }

    #[test]
    fn zero_offset_uses_system_zone() {
        let millis = 1_706_731_200_000_i64;
        let expected = DateTime::<Utc>::from_timestamp_millis(millis)
            .expect("in range")
            .with_timezone(&Local)
            .naive_local();

        let moment = forced(0).normalize(0, &json!(millis)).expect("ok");
        assert_eq!(moment, CalendarMoment::from_naive(expected));
    }

    #[test]
    fn fractional_timestamps_are_truncated() {
        let moment = forced(3600)
            .normalize(0, &json!(1_706_731_200_999.7_f64))
            .expect("ok");
        assert_eq!(moment, CalendarMoment::new(2024, 1, 31, 21, 0, 0));
    }

    #[test]
    fn non_date_kinds_are_rejected() {
        let normalizer = TimeNormalizer::default();
        for (value, kind) in [
            (json!(null), "null"),
            (json!(true), "bool"),
            (json!([1, 2]), "array"),
            (json!({"date": 1}), "object"),
        ] {
            let err = normalizer.normalize(7, &value).expect_err("must fail");
            assert_eq!(err, ScaleError::UnsupportedValueKind { index: 7, kind });
        }
    }
}
