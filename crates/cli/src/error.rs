use std::fmt::Display;

use repostats_series::error::SeriesError;
use repostats_series::fetch::error::FetchError;
use repostats_vis::error::VisError;

#[derive(Debug)]
pub(crate) enum CliError {
    Fetch(FetchError),
    PageData(SeriesError),
    Vis(VisError),
    Path(String),
    Config(String),
}

impl From<FetchError> for CliError {
    fn from(error: FetchError) -> Self {
        CliError::Fetch(error)
    }
}

impl From<SeriesError> for CliError {
    fn from(error: SeriesError) -> Self {
        CliError::PageData(error)
    }
}

impl From<VisError> for CliError {
    fn from(error: VisError) -> Self {
        CliError::Vis(error)
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cli_error = "CLI error:";

        match self {
            CliError::Fetch(error) => write!(f, "{cli_error} {error}"),
            CliError::PageData(error) => write!(f, "{cli_error} reading page data: {error}"),
            CliError::Vis(error) => write!(f, "{cli_error} {error}"),
            CliError::Path(error) => write!(f, "{cli_error} {error}"),
            CliError::Config(error) => write!(f, "{cli_error} {error}"),
        }
    }
}

impl std::error::Error for CliError {}
