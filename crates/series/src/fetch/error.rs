use std::error::Error;
use std::fmt::Display;

pub use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, FetchError>;

/// The error type for fetching statistics from the dashboard endpoint.
#[derive(Debug)]
pub enum FetchError {
    /// The page URL could not be parsed.
    Url(String),
    Http(reqwest::Error),
    Response {
        status_code: StatusCode,
        message: String,
    },
    Json(serde_json::Error),
    /// The response body is valid JSON but lacks a required field.
    MissingField(&'static str),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fetch_error = "fetch error:";

        match self {
            FetchError::Url(error) => write!(f, "{fetch_error} invalid page URL: {error}"),
            FetchError::Http(error) => write!(f, "{fetch_error} HTTP request error: {error}"),
            FetchError::Response {
                status_code,
                message,
            } => write!(
                f,
                "{fetch_error} HTTP response error: status = {status_code}, message = {message}"
            ),
            FetchError::Json(error) => {
                write!(f, "{fetch_error} could not decode the response body: {error}")
            }
            FetchError::MissingField(field) => {
                write!(f, "{fetch_error} the response has no `{field}` field")
            }
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FetchError::Http(error) => Some(error),
            FetchError::Json(error) => Some(error),
            FetchError::Url(_) | FetchError::Response { .. } | FetchError::MissingField(_) => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        FetchError::Http(error)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        FetchError::Json(error)
    }
}
