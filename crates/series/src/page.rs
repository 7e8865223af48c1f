use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::series::TimeSeries;

/// The datasets a dashboard page carries with it: stars, open issues and
/// open pull requests per day.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PageData {
    #[serde(default)]
    pub stars_by_day: TimeSeries,
    #[serde(default)]
    pub issues_by_day: TimeSeries,
    #[serde(default)]
    pub pulls_by_day: TimeSeries,
}

impl PageData {
    pub fn from_path(path: &Path) -> Result<PageData> {
        let reader = BufReader::new(File::open(path)?);
        let data = serde_json::from_reader(reader)?;

        tracing::debug!(path = %path.display(), "read page data");

        Ok(data)
    }
}
