//! Calendar dates and timestamps used by the record types

use chrono::{DateTime, Days, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Deserializer};

/// Shelf life of a collected unit in calendar days
pub const SHELF_LIFE_DAYS: u64 = 35;

/// Expiry date of a unit collected on `collection_date`.
///
/// Calendar-day arithmetic, so month and year boundaries roll over the way
/// a calendar does. Returns `None` only when the result would leave the
/// representable date range.
pub fn expiry_date(collection_date: NaiveDate) -> Option<NaiveDate> {
    collection_date.checked_add_days(Days::new(SHELF_LIFE_DAYS))
}

/// Current time at the precision timestamps are stored with
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Parse a calendar date given either as `YYYY-MM-DD` or as an RFC 3339
/// timestamp, in which case its UTC date is used.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc).date_naive())
    })
}

/// Deserialize an optional calendar date accepting both date and timestamp
/// forms.
pub fn deserialize_lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(raw) => parse_calendar_date(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date `{raw}`"))),
    }
}

/// Serde adapter storing timestamps as fixed-width RFC 3339 strings with
/// millisecond precision. Fixed width keeps string order chronological.
pub mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_expiry_date_rolls_over_calendar_boundaries() {
        let fixtures = vec![
            (date(2024, 1, 1), date(2024, 2, 5)),
            (date(2024, 2, 1), date(2024, 3, 7)),
            (date(2023, 2, 1), date(2023, 3, 8)),
            (date(2024, 12, 15), date(2025, 1, 19)),
        ];

        for (collected, expected) in fixtures {
            let actual = expiry_date(collected).unwrap();
            assert_eq!(actual, expected, "Collected: {}", collected);
        }
    }

    #[test]
    fn test_parse_calendar_date_accepts_timestamps() {
        let fixtures = vec![
            ("2024-01-01", Some(date(2024, 1, 1))),
            ("2024-01-01T00:00:00.000Z", Some(date(2024, 1, 1))),
            ("2024-01-01T23:30:00-02:00", Some(date(2024, 1, 2))),
            ("01/02/2024", None),
            ("", None),
        ];

        for (raw, expected) in fixtures {
            let actual = parse_calendar_date(raw);
            assert_eq!(actual, expected, "Input: {}", raw);
        }
    }

    #[derive(Serialize)]
    struct Stamped {
        #[serde(with = "timestamp")]
        at: DateTime<Utc>,
    }

    #[test]
    fn test_timestamp_has_fixed_width() {
        let fixture = Stamped { at: Utc.with_ymd_and_hms(2024, 3, 9, 8, 5, 0).unwrap() };

        let actual = serde_json::to_string(&fixture).unwrap();
        let expected = r#"{"at":"2024-03-09T08:05:00.000Z"}"#;

        assert_eq!(actual, expected);
    }
}
