//! Defines the `Error` and `Result` types that this crate uses.

use std::error::Error;
use std::fmt::Display;
use std::io::Error as IoError;

use tinytemplate::error::Error as TinyTemplateError;

/// The result type that uses [VisError] as the error type.
pub type Result<T> = std::result::Result<T, VisError>;

/// The error type for rendering a repository statistics dashboard.
#[derive(Debug)]
#[non_exhaustive]
pub enum VisError {
    /// A [std::io::Error] encountered while writing the dashboard page.
    Io(IoError),

    /// A [tinytemplate::error::Error] encountered while parsing or
    /// rendering the page template.
    TemplateError(TinyTemplateError),

    /// A [serde_json::Error] encountered while serializing chart data
    /// or chart options.
    JsonSerialization(serde_json::Error),
}

impl Error for VisError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            VisError::Io(error) => Some(error),
            VisError::TemplateError(error) => Some(error),
            VisError::JsonSerialization(error) => Some(error),
        }
    }
}

impl Display for VisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let vis_error = "vis error:";

        match self {
            VisError::Io(error) => write!(f, "{vis_error} I/O error: {error}"),
            VisError::TemplateError(error) => write!(f, "{vis_error} template error: {error}"),
            VisError::JsonSerialization(error) => {
                write!(f, "{vis_error} JSON serialization error: {error}")
            }
        }
    }
}

impl From<TinyTemplateError> for VisError {
    fn from(error: TinyTemplateError) -> Self {
        VisError::TemplateError(error)
    }
}

impl From<IoError> for VisError {
    fn from(error: IoError) -> Self {
        VisError::Io(error)
    }
}

impl From<serde_json::Error> for VisError {
    fn from(error: serde_json::Error) -> Self {
        VisError::JsonSerialization(error)
    }
}
