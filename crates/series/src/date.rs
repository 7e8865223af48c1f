use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::TimeZone;
use chrono::Utc;
use serde::Serialize;
use serde::Serializer;

/// A date parsed from the first field of a time series row.
///
/// A value that could not be parsed is kept as an invalid date rather than
/// rejected. It serializes to `null` and the chart widget decides what to
/// do with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChartDate(Option<DateTime<Utc>>);

impl ChartDate {
    // The statistics server writes `2023-01-05 00:00:00Z`.
    const SERVER_FORMAT: &str = "%Y-%m-%d %H:%M:%SZ";
    const NAIVE_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
    const NAIVE_DATE_FORMAT: &str = "%Y-%m-%d";

    /// Parses a serialized date. Never fails: unknown formats yield an
    /// invalid date.
    pub fn parse(value: &str) -> ChartDate {
        let value = value.trim();

        let parsed = NaiveDateTime::parse_from_str(value, Self::SERVER_FORMAT)
            .map(|dt| Utc.from_utc_datetime(&dt))
            .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc)))
            .or_else(|_| {
                NaiveDateTime::parse_from_str(value, Self::NAIVE_DATE_TIME_FORMAT)
                    .map(|dt| Utc.from_utc_datetime(&dt))
            })
            .or_else(|_| {
                NaiveDate::parse_from_str(value, Self::NAIVE_DATE_FORMAT)
                    .map(|d| Utc.from_utc_datetime(&d.and_time(chrono::NaiveTime::MIN)))
            })
            .ok();

        Self(parsed)
    }

    pub fn invalid() -> ChartDate {
        Self(None)
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    /// Milliseconds since the Unix epoch, the unit the chart widget uses.
    pub fn timestamp_millis(&self) -> Option<i64> {
        self.0.map(|dt| dt.timestamp_millis())
    }
}

impl From<DateTime<Utc>> for ChartDate {
    fn from(value: DateTime<Utc>) -> Self {
        Self(Some(value))
    }
}

impl Display for ChartDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(dt) => Display::fmt(&dt, f),
            None => write!(f, "Invalid Date"),
        }
    }
}

impl Serialize for ChartDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.timestamp_millis() {
            Some(millis) => serializer.serialize_i64(millis),
            None => serializer.serialize_none(),
        }
    }
}
