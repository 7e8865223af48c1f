//! Identifiers of the elements the dashboard page is built from.

use std::fmt::Display;
use std::fmt::Formatter;

/// The identifier of an element on the dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ContainerId(&'static str);

impl ContainerId {
    /// The stargazers chart.
    pub const STARS: ContainerId = ContainerId("stars");
    /// The open issues chart.
    pub const ISSUES: ContainerId = ContainerId("issues");
    /// The open pull requests chart.
    pub const PULLS: ContainerId = ContainerId("pulls");
    /// The open issues per label chart.
    pub const LABELS: ContainerId = ContainerId("labels");
    /// The legend of the per-label chart.
    pub const LABELS_LEGEND: ContainerId = ContainerId("by-label-legend");
    /// The per-label section, hidden until its dataset has loaded.
    pub const LABELS_CHARTS: ContainerId = ContainerId("labels-charts");
    /// Shown while the per-label dataset is loading.
    pub const LABELS_LOADING_MESSAGE: ContainerId = ContainerId("labels-loading-message");
    /// Shown when the per-label dataset could not be fetched.
    pub const LABELS_FAILED_MESSAGE: ContainerId = ContainerId("labels-failed-message");
    /// The ranked table of current open issues per label.
    pub const CURRENT_LABELS: ContainerId = ContainerId("current-labels");

    /// The element id as it appears in the page.
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Display for ContainerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
