//! [repostats]' visualization library.
//!
//! [repostats]: https://github.com/nelusnegur/repostats
//!
//! Builds the repository statistics dashboard: the stars, open issues and
//! open pull requests charts, and the per-label section that is filled in
//! once the per-label dataset has been fetched. The dashboard renders to a
//! single HTML page driven by the Dygraphs charting library.
//!
//! **WARNING**: This library is repostats' internal visualization library and
//! there are no plans to stabilize it. The API may break at any time without notice.

#![warn(missing_docs)]

pub(crate) mod template;

pub mod chart;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod id;
pub mod options;
pub mod render;
