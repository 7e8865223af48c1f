use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::de::SeqAccess;
use serde::de::Visitor;

use crate::date::ChartDate;
use crate::repo::RepoId;
use crate::series::Row;
use crate::series::TimeSeries;

/// The header name the statistics server uses for issues without a label.
pub const UNLABELED: &str = "(unlabeled)";

/// Open issue counts per label over time.
///
/// On the wire this is a table whose first row is a header (a placeholder
/// for the date column followed by the label names) and whose remaining
/// rows are `[date, count per label...]`. The header is never treated as a
/// data row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelDataset {
    pub header: Vec<String>,
    pub rows: TimeSeries,
}

impl LabelDataset {
    pub fn new(header: Vec<String>, rows: TimeSeries) -> LabelDataset {
        Self { header, rows }
    }

    /// Normalizes the date of every data row. The header is left as is.
    pub fn normalize_dates(&mut self) {
        self.rows.normalize_dates();
    }

    /// The label names, without the date column placeholder.
    pub fn labels(&self) -> &[String] {
        self.header.get(1..).unwrap_or_default()
    }

    /// The date of the most recent row, if it has been normalized.
    pub fn last_date(&self) -> Option<ChartDate> {
        self.rows.last().and_then(|row| row.date.as_date())
    }

    /// Pairs each count of the most recent row with its label, highest
    /// count first. Labels with equal counts keep their header order and
    /// labels without a current count are left out.
    pub fn current_counts(&self) -> Vec<LabelCount> {
        let Some(last) = self.rows.last() else {
            return Vec::new();
        };

        let mut counts: Vec<LabelCount> = last
            .values
            .iter()
            .zip(self.labels())
            .filter_map(|(count, label)| {
                count.map(|count| LabelCount::new(count.round() as i64, label.clone()))
            })
            .collect();

        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts
    }
}

impl<'de> Deserialize<'de> for LabelDataset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(LabelDatasetVisitor)
    }
}

struct LabelDatasetVisitor;

impl<'de> Visitor<'de> for LabelDatasetVisitor {
    type Value = LabelDataset;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a header row of label names followed by dated count rows")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let header = match seq.next_element::<Vec<String>>()? {
            Some(header) => header,
            None => return Err(serde::de::Error::invalid_length(0, &self)),
        };

        let mut rows: Vec<Row> = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(row) = seq.next_element::<Row>()? {
            rows.push(row);
        }

        Ok(LabelDataset::new(header, TimeSeries::new(rows)))
    }
}

/// The current number of open issues carrying a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCount {
    pub count: i64,
    pub label: String,
}

impl LabelCount {
    pub fn new(count: i64, label: impl Into<String>) -> LabelCount {
        Self {
            count,
            label: label.into(),
        }
    }

    /// The page on the code hosting platform that lists the issues behind
    /// this count.
    pub fn url(&self, repo: &RepoId) -> String {
        if self.label == UNLABELED {
            format!("{}/issues?q=is%3Aopen+no%3Alabel", repo.url())
        } else {
            format!(
                "{}/labels/{label}",
                repo.url(),
                label = urlencoding::encode(&self.label)
            )
        }
    }
}
