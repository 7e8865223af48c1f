//! The dashboard and the lifecycle of its per-label section.

use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

use repostats_series::ChartDate;
use repostats_series::LabelCount;
use repostats_series::LabelDataset;
use repostats_series::RepoId;
use repostats_series::TimeSeries;
use repostats_series::fetch::LabelSource;

use crate::chart;
use crate::chart::Chart;
use crate::id::ContainerId;
use crate::options::ChartOptions;

/// Everything a dashboard is built from.
#[derive(Debug, Clone, Default)]
pub struct DashboardConfig {
    /// Stargazers per day.
    pub stars_by_day: TimeSeries,
    /// Open issues per day.
    pub issues_by_day: TimeSeries,
    /// Open pull requests per day.
    pub pulls_by_day: TimeSeries,
    /// The owner of the repository.
    pub owner: String,
    /// The name of the repository.
    pub repo: String,
    /// The URL of the dashboard page; its JSON endpoint serves the
    /// per-label dataset.
    pub endpoint_url: String,
}

/// The state of the per-label section of the dashboard.
///
/// The section starts as [LabelStatus::Loading] and moves exactly once to
/// either [LabelStatus::Loaded] or [LabelStatus::Failed].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelStatus {
    /// The per-label dataset has not arrived yet.
    Loading,
    /// The per-label chart and table are filled in.
    Loaded,
    /// The per-label dataset could not be fetched, for the given reason.
    Failed(String),
}

impl Display for LabelStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LabelStatus::Loading => write!(f, "loading"),
            LabelStatus::Loaded => write!(f, "loaded"),
            LabelStatus::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// The ranked table of current open issue counts per label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelTable {
    rows: Vec<LabelCount>,
}

impl LabelTable {
    /// Appends a batch of rows after the existing ones.
    pub fn append(&mut self, rows: Vec<LabelCount>) {
        self.rows.extend(rows);
    }

    /// The rows of the table, in display order.
    pub fn rows(&self) -> &[LabelCount] {
        &self.rows
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The repository statistics dashboard: three per-day charts and a per-label
/// section that is filled in once its dataset arrives.
#[derive(Debug)]
pub struct Dashboard {
    pub(crate) repo: RepoId,
    pub(crate) endpoint_url: String,
    pub(crate) charts: Vec<Chart>,
    pub(crate) status: LabelStatus,
    pub(crate) label_chart: Option<Chart>,
    pub(crate) label_table: LabelTable,
    pub(crate) labels_as_of: Option<ChartDate>,
}

impl Dashboard {
    /// Normalizes the per-day datasets and constructs the stars, issues and
    /// pull requests charts. The per-label section starts out loading.
    pub fn init(config: DashboardConfig) -> Dashboard {
        let DashboardConfig {
            mut stars_by_day,
            mut issues_by_day,
            mut pulls_by_day,
            owner,
            repo,
            endpoint_url,
        } = config;

        stars_by_day.normalize_dates();
        issues_by_day.normalize_dates();
        pulls_by_day.normalize_dates();

        let base = ChartOptions::base();
        let charts = vec![
            Chart::construct(
                ContainerId::STARS,
                stars_by_day,
                base.merge(&chart::filled_series("Stargazers")),
            ),
            Chart::construct(
                ContainerId::ISSUES,
                issues_by_day,
                base.merge(&chart::filled_series("Open Issues")),
            ),
            Chart::construct(
                ContainerId::PULLS,
                pulls_by_day,
                base.merge(&chart::filled_series("Open Pull Requests")),
            ),
        ];

        let repo = RepoId::new(owner, repo);
        tracing::info!(%repo, "dashboard initialized");

        Self {
            repo,
            endpoint_url,
            charts,
            status: LabelStatus::Loading,
            label_chart: None,
            label_table: LabelTable::default(),
            labels_as_of: None,
        }
    }

    /// Fetches the per-label dataset from `source` and renders it, or
    /// records the failure. Does nothing once the section has left the
    /// loading state.
    pub async fn load_labels<S>(&mut self, source: &S)
    where
        S: LabelSource + ?Sized,
    {
        if self.status != LabelStatus::Loading {
            tracing::debug!(status = %self.status, "labels already settled");
            return;
        }

        match source.fetch_labels().await {
            Ok(dataset) => self.show_labels(dataset),
            Err(error) => self.fail_labels(error.to_string()),
        }
    }

    /// Reveals the per-label section and fills it from `dataset`.
    pub fn show_labels(&mut self, mut dataset: LabelDataset) {
        if self.status != LabelStatus::Loading {
            return;
        }
        self.status = LabelStatus::Loaded;

        dataset.normalize_dates();

        let options = ChartOptions::base().merge(&chart::label_series(&dataset.header));
        let counts = dataset.current_counts();
        self.labels_as_of = dataset.last_date();
        self.label_chart = Some(Chart::construct(
            ContainerId::LABELS,
            dataset.rows,
            options,
        ));

        tracing::info!(labels = counts.len(), "per-label issue counts loaded");
        self.label_table.append(counts);
    }

    /// Marks the per-label section as failed. The chart and table stay
    /// empty.
    pub fn fail_labels(&mut self, reason: String) {
        if self.status != LabelStatus::Loading {
            return;
        }

        tracing::warn!(%reason, "could not load per-label issue counts");
        self.status = LabelStatus::Failed(reason);
    }

    /// The repository the dashboard describes.
    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    /// The stars, issues and pull requests charts, in page order.
    pub fn charts(&self) -> &[Chart] {
        &self.charts
    }

    /// The state of the per-label section.
    pub fn status(&self) -> &LabelStatus {
        &self.status
    }

    /// The per-label chart, once the per-label dataset has loaded.
    pub fn label_chart(&self) -> Option<&Chart> {
        self.label_chart.as_ref()
    }

    /// The ranked table of current open issues per label.
    pub fn label_table(&self) -> &LabelTable {
        &self.label_table
    }

    /// The date of the counts in the label table.
    pub fn labels_as_of(&self) -> Option<ChartDate> {
        self.labels_as_of
    }

    /// Whether the page shows the loading message.
    pub fn loading_message_visible(&self) -> bool {
        self.status == LabelStatus::Loading
    }

    /// Whether the page shows the per-label chart and table.
    pub fn label_charts_visible(&self) -> bool {
        self.status == LabelStatus::Loaded
    }

    /// Whether the page shows why the per-label dataset is missing.
    pub fn failed_message_visible(&self) -> bool {
        matches!(self.status, LabelStatus::Failed(_))
    }
}
