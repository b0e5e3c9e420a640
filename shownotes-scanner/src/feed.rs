use crate::error::{Result, ScanError};
use crate::fetcher::PageFetcher;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One episode as listed in the podcast feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeEntry {
    pub title: Option<String>,
    /// Canonical episode page URL
    pub link: String,
}

/// Parse an RSS or Atom document into episode entries, in feed order.
///
/// Entries without a link are dropped.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<EpisodeEntry>> {
    let feed = feed_rs::parser::parse(bytes).map_err(|e| ScanError::FeedError(e.to_string()))?;

    let entries: Vec<EpisodeEntry> = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let link = entry
                .links
                .iter()
                .map(|l| l.href.trim())
                .find(|href| !href.is_empty())?
                .to_string();
            Some(EpisodeEntry {
                title: entry.title.map(|t| t.content),
                link,
            })
        })
        .collect();

    debug!("Parsed {} episode entries", entries.len());
    Ok(entries)
}

pub async fn fetch_episodes<F: PageFetcher>(fetcher: &F, feed_url: &str) -> Result<Vec<EpisodeEntry>> {
    info!("Fetching feed {}", feed_url);
    let page = fetcher.fetch(feed_url).await?;
    parse_feed(page.body.as_bytes())
}
