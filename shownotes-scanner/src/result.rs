use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Show-notes links of one episode, keyed by display text.
///
/// Two anchors with the same text collapse into one entry; the later anchor wins.
pub type ShowNotes = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub url: String,
}

impl Link {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

/// A page as returned by a [`PageFetcher`](crate::PageFetcher).
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: String,
    pub status_code: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn new(url: String, status_code: u16, body: String) -> Self {
        Self {
            url,
            status_code,
            body,
        }
    }
}
