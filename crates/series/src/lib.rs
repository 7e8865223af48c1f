//! Repository statistics time series.
//!
//! This crate reads the per-day datasets behind a repository statistics
//! dashboard (stars, open issues, open pull requests and open issues per
//! label), normalizes their serialized dates and fetches them from the
//! dashboard's JSON endpoint.

mod date;
mod page;
mod repo;
mod series;

pub mod error;
pub mod fetch;
pub mod labels;

pub use crate::date::ChartDate;
pub use crate::labels::LabelCount;
pub use crate::labels::LabelDataset;
pub use crate::page::PageData;
pub use crate::repo::RepoId;
pub use crate::series::DateField;
pub use crate::series::Row;
pub use crate::series::TimeSeries;
