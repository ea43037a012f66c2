//! Wire formats for dates and date-times.

use chrono::{NaiveDate, NaiveDateTime, SubsecRound};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepted date-time input layouts, tried in order.
const DATETIME_INPUT_FORMATS: &[&str] = &[
    DATETIME_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a client date-time. A bare date means midnight; fractional seconds
/// are dropped so stored values match what is served back.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    DATETIME_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|parsed| parsed.trunc_subsecs(0))
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

pub fn serialize_datetime<S: Serializer>(
    value: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&value.format(DATETIME_FORMAT))
}

pub fn serialize_optional_datetime<S: Serializer>(
    value: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serialize_datetime(value, serializer),
        None => serializer.serialize_none(),
    }
}

pub fn serialize_optional_date<S: Serializer>(
    value: &Option<NaiveDate>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serializer.collect_str(&value.format(DATE_FORMAT)),
        None => serializer.serialize_none(),
    }
}

/// `null`, absent and blank strings all mean "not provided".
pub fn deserialize_optional_datetime<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_datetime(text)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid date-time `{text}`"))),
    }
}

pub fn deserialize_optional_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid date `{text}`"))),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_datetime;
    use chrono::NaiveDate;

    #[test]
    fn parse_datetime_accepts_space_t_and_bare_date() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        assert_eq!(parse_datetime("2025-03-09 14:05:00"), Some(expected));
        assert_eq!(parse_datetime("2025-03-09T14:05:00"), Some(expected));
        assert_eq!(parse_datetime("2025-03-09T14:05"), Some(expected));

        let midnight = NaiveDate::from_ymd_opt(2025, 3, 9)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_datetime(" 2025-03-09 "), Some(midnight));
    }

    #[test]
    fn parse_datetime_drops_fractional_seconds() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap();
        assert_eq!(parse_datetime("2025-03-09T14:05:07.987"), Some(expected));
        assert_eq!(parse_datetime("2025-03-09 14:05:07.5"), Some(expected));
    }

    #[test]
    fn parse_datetime_rejects_garbage() {
        assert_eq!(parse_datetime("09/03/2025"), None);
        assert_eq!(parse_datetime(""), None);
    }
}
