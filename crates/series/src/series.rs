use std::fmt;
use std::slice;

use chrono::DateTime;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::IgnoredAny;
use serde::de::SeqAccess;
use serde::de::Visitor;
use serde::ser::SerializeSeq;

use crate::date::ChartDate;

/// The first field of a time series row.
///
/// Rows arrive with a serialized date and are converted in place into
/// [`DateField::Date`] by [`Row::normalize`].
#[derive(Debug, Clone, PartialEq)]
pub enum DateField {
    Serialized(String),
    Date(ChartDate),
}

impl DateField {
    pub fn as_date(&self) -> Option<ChartDate> {
        match self {
            DateField::Serialized(_) => None,
            DateField::Date(date) => Some(*date),
        }
    }
}

/// A single time series row: a date followed by one count per series.
///
/// A missing count is `None` and is drawn as a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub date: DateField,
    pub values: Vec<Option<f64>>,
}

impl Row {
    pub fn new<V>(date: impl Into<String>, values: impl IntoIterator<Item = V>) -> Row
    where
        V: Into<Option<f64>>,
    {
        Self {
            date: DateField::Serialized(date.into()),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Replaces a serialized date with the parsed one. The values are left
    /// untouched and an already normalized row does not change.
    pub fn normalize(&mut self) {
        if let DateField::Serialized(value) = &self.date {
            self.date = DateField::Date(ChartDate::parse(value));
        }
    }

    pub fn is_normalized(&self) -> bool {
        matches!(self.date, DateField::Date(_))
    }
}

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.values.len() + 1))?;

        match &self.date {
            DateField::Serialized(value) => seq.serialize_element(value)?,
            DateField::Date(date) => seq.serialize_element(date)?,
        }

        for value in &self.values {
            seq.serialize_element(value)?;
        }

        seq.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(RowVisitor)
    }
}

struct RowVisitor;

impl<'de> Visitor<'de> for RowVisitor {
    type Value = Row;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an array of a date followed by numeric or null counts")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let date = match seq.next_element::<RawDate>()? {
            Some(date) => date.into(),
            None => return Err(serde::de::Error::invalid_length(0, &self)),
        };

        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(1));
        while let Some(value) = seq.next_element::<Option<f64>>()? {
            values.push(value);
        }

        Ok(Row { date, values })
    }
}

// Whatever sits in the date column. Timestamps in milliseconds are accepted
// as already parsed dates, anything that is neither a string nor a number
// becomes an invalid date.
enum RawDate {
    Text(String),
    Millis(i64),
    Other,
}

impl From<RawDate> for DateField {
    fn from(raw: RawDate) -> Self {
        match raw {
            RawDate::Text(value) => DateField::Serialized(value),
            RawDate::Millis(millis) => DateField::Date(
                DateTime::from_timestamp_millis(millis)
                    .map(ChartDate::from)
                    .unwrap_or_else(ChartDate::invalid),
            ),
            RawDate::Other => DateField::Date(ChartDate::invalid()),
        }
    }
}

impl<'de> Deserialize<'de> for RawDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RawDateVisitor)
    }
}

struct RawDateVisitor;

impl<'de> Visitor<'de> for RawDateVisitor {
    type Value = RawDate;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a serialized date")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(RawDate::Text(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(RawDate::Text(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(RawDate::Millis(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(i64::try_from(v).map_or(RawDate::Other, RawDate::Millis))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        if v.is_finite() {
            Ok(RawDate::Millis(v as i64))
        } else {
            Ok(RawDate::Other)
        }
    }

    fn visit_bool<E>(self, _: bool) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(RawDate::Other)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(RawDate::Other)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(RawDate::Other)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(RawDate::Other)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(RawDate::Other)
    }
}

/// An ordered sequence of rows, sorted by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries(Vec<Row>);

impl TimeSeries {
    pub fn new(rows: Vec<Row>) -> TimeSeries {
        Self(rows)
    }

    /// Converts the first field of every row into a date, in place.
    pub fn normalize_dates(&mut self) {
        self.0.iter_mut().for_each(Row::normalize);
    }

    pub fn is_normalized(&self) -> bool {
        self.0.iter().all(Row::is_normalized)
    }

    pub fn rows(&self) -> &[Row] {
        &self.0
    }

    pub fn last(&self) -> Option<&Row> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Row> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a Row;
    type IntoIter = slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
