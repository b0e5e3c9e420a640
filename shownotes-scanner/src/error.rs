use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("No show notes section found on {url}")]
    Structure { url: String },

    #[error("Feed error: {0}")]
    FeedError(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl ScanError {
    /// Connection failures and timeouts, as opposed to malformed input.
    pub fn is_network(&self) -> bool {
        match self {
            ScanError::HttpError(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
