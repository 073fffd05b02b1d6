use std::time::Duration;

use thiserror::Error;

use crate::core::models::Ticker;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum NsError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// Fetching a ticker's page did not finish within the per-ticker deadline.
    #[error("fetch for {ticker} timed out after {after:?}")]
    Timeout {
        /// The ticker whose fetch was abandoned.
        ticker: Ticker,
        /// The deadline that elapsed.
        after: Duration,
    },

    /// Reading or writing the history file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The history file could not be encoded or decoded as CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The data received was in an unexpected format.
    #[error("Data format unexpected: {0}")]
    Data(String),

    /// Invalid parameters were provided to a builder or operation.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// A refresh was cancelled before the store was touched.
    #[error("refresh cancelled")]
    Cancelled,
}

impl From<tempfile::PersistError> for NsError {
    fn from(e: tempfile::PersistError) -> Self {
        NsError::Io(e.error)
    }
}

impl NsError {
    /// Whether this error came from fetching a page (network, status or timeout)
    /// as opposed to local persistence or configuration.
    #[must_use]
    pub const fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            NsError::Http(_) | NsError::Status { .. } | NsError::Timeout { .. }
        )
    }
}
