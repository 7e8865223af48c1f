//! Time series charts placed on the dashboard page.

use repostats_series::TimeSeries;
use serde_json::json;

use crate::id::ContainerId;
use crate::options::ChartOptions;

/// A time series chart bound to a container on the dashboard page.
///
/// Charts are constructed once and never updated.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    container: ContainerId,
    data: TimeSeries,
    options: ChartOptions,
}

impl Chart {
    /// Constructs the chart in `container` from `data`, drawn with
    /// `options`.
    pub fn construct(container: ContainerId, data: TimeSeries, options: ChartOptions) -> Chart {
        tracing::debug!(
            %container,
            rows = data.len(),
            labels = ?options.labels(),
            "constructing chart"
        );

        Self {
            container,
            data,
            options,
        }
    }

    /// The page element the chart is drawn in.
    pub fn container(&self) -> ContainerId {
        self.container
    }

    /// The rows the chart plots.
    pub fn data(&self) -> &TimeSeries {
        &self.data
    }

    /// The options the chart is drawn with.
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }
}

/// Overrides for a single series chart with a filled area.
pub(crate) fn filled_series(label: &str) -> ChartOptions {
    ChartOptions::new()
        .with("labels", json!(["Date", label]))
        .with("fillGraph", true)
}

/// Overrides for the per-label chart: one series per header label, the
/// legend in its own container and the hovered series highlighted.
pub(crate) fn label_series(header: &[String]) -> ChartOptions {
    ChartOptions::new()
        .with("labels", json!(header))
        .with("labelsDiv", ContainerId::LABELS_LEGEND.as_str())
        .with("highlightSeriesOpts", json!({ "strokeWidth": 2 }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_series_overrides() {
        let options = ChartOptions::base().merge(&filled_series("Stargazers"));

        assert_eq!(options.labels(), vec!["Date", "Stargazers"]);
        assert_eq!(options.get("fillGraph"), Some(&json!(true)));
        assert_eq!(options.get("legend"), Some(&json!("always")));
    }

    #[test]
    fn label_series_overrides() {
        let header = vec![String::from("Date"), String::from("bug")];

        let options = ChartOptions::base().merge(&label_series(&header));

        assert_eq!(options.labels(), vec!["Date", "bug"]);
        assert_eq!(options.get("labelsDiv"), Some(&json!("by-label-legend")));
        assert_eq!(
            options.get("highlightSeriesOpts"),
            Some(&json!({ "strokeWidth": 2 }))
        );
        assert_eq!(options.get("fillGraph"), None);
    }
}
