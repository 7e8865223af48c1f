//! Chart options and how they are combined.

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::format::DATE_FORMATTER;

/// Chart widget options, keyed by option name.
///
/// Options are combined with [ChartOptions::merge], which never changes
/// either side.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChartOptions(Map<String, Value>);

impl ChartOptions {
    /// Creates an empty set of options.
    pub fn new() -> ChartOptions {
        Self(Map::new())
    }

    /// The options every dashboard chart starts from. The x axis values are
    /// formatted by the page's date formatter.
    pub fn base() -> ChartOptions {
        Self::new()
            .with("legend", "always")
            .with("labelsSeparateLines", true)
            .with("includeZero", true)
            .with("gridLineWidth", 0.1)
            .with("axes", json!({ "x": { "valueFormatter": DATE_FORMATTER } }))
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> ChartOptions {
        self.0.insert(key.to_owned(), value.into());
        self
    }

    /// The value of option `key`, if set.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The number of options set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no option is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a new set of options holding every key of `self` overlaid by
    /// every key of `overrides`. Nested objects are replaced, not merged.
    pub fn merge(&self, overrides: &ChartOptions) -> ChartOptions {
        let mut merged = self.0.clone();
        merged.extend(overrides.0.clone());
        Self(merged)
    }

    /// The series labels, the first of which names the x axis.
    pub fn labels(&self) -> Vec<&str> {
        self.get("labels")
            .and_then(Value::as_array)
            .map(|labels| labels.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}
