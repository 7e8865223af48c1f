//! Defines the error types this crate uses while reading datasets.

use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io;

/// The result type that uses [SeriesError] as the error type.
pub type Result<T> = std::result::Result<T, SeriesError>;

/// The error type for reading time series datasets from disk.
#[derive(Debug)]
pub enum SeriesError {
    /// A [std::io::Error] encountered while reading a dataset file.
    Io(io::Error),

    /// A [serde_json::Error] encountered while decoding a dataset.
    Json(serde_json::Error),
}

impl Display for SeriesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let series_error = "series error:";

        match self {
            SeriesError::Io(error) => write!(f, "{series_error} I/O error: {error}"),
            SeriesError::Json(error) => {
                write!(f, "{series_error} could not decode the dataset: {error}")
            }
        }
    }
}

impl Error for SeriesError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SeriesError::Io(error) => Some(error),
            SeriesError::Json(error) => Some(error),
        }
    }
}

impl From<io::Error> for SeriesError {
    fn from(error: io::Error) -> Self {
        SeriesError::Io(error)
    }
}

impl From<serde_json::Error> for SeriesError {
    fn from(error: serde_json::Error) -> Self {
        SeriesError::Json(error)
    }
}
