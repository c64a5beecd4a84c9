//! Search failures
//!
//! Every variant collapses to the same user-facing "Error loading results";
//! the detail only reaches the logs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("failed to reach search endpoint: {0}")]
    Network(#[source] reqwest::Error),

    #[error("search endpoint returned {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed search response: {0}")]
    Decode(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SearchError::Decode(err.to_string())
        } else {
            SearchError::Network(err)
        }
    }
}
