use crate::classify::Classifier;
use crate::directory::SiteDirectory;
use crate::model::{EpisodeFailure, EpisodeReport, RunOutcome};
use indicatif::{ProgressBar, ProgressStyle};
use shownotes_scanner::error::Result;
use shownotes_scanner::{EpisodeEntry, LinkExtractor, PageFetcher, fetch_episodes};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

pub const DEFAULT_FEED_URL: &str = "http://www.chat10looks3.com/podcast/?format=rss";
pub const DEFAULT_BASE_EPISODES_URL: &str = "https://www.chat10looks3.com/podcast";
/// Pause between episodes so the source site isn't hammered
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(3);

/// Which episodes a run covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpisodeSelection {
    /// Episode numbers, turned into `<base>/ep<number>` URLs
    Numbers(Vec<u32>),
    /// Every entry of the podcast feed, in feed order
    WholeFeed,
}

/// Options for configuring a run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub selection: EpisodeSelection,
    pub base_episodes_url: String,
    pub feed_url: String,
    pub pause: Duration,
    pub filter_footer: bool,
    pub show_progress_bars: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            selection: EpisodeSelection::Numbers(Vec::new()),
            base_episodes_url: DEFAULT_BASE_EPISODES_URL.to_string(),
            feed_url: DEFAULT_FEED_URL.to_string(),
            pause: DEFAULT_PAUSE,
            filter_footer: true,
            show_progress_bars: false,
        }
    }
}

/// Callback for reporting run progress
pub type RunProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

pub fn episode_url(base_episodes_url: &str, number: u32) -> String {
    format!("{}/ep{}", base_episodes_url.trim_end_matches('/'), number)
}

/// Short reference for a feed entry: the number from an `ep<number>` URL,
/// else the entry title, else the URL itself.
pub fn episode_label(entry: &EpisodeEntry) -> String {
    let number = Url::parse(&entry.link).ok().and_then(|url| {
        url.path_segments()?
            .filter(|segment| !segment.is_empty())
            .next_back()
            .and_then(|segment| segment.strip_prefix("ep"))
            .filter(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
            .map(str::to_string)
    });

    number
        .or_else(|| entry.title.clone())
        .unwrap_or_else(|| entry.link.clone())
}

async fn episode_targets<F: PageFetcher>(
    options: &RunOptions,
    fetcher: &F,
) -> Result<Vec<(String, String)>> {
    match &options.selection {
        EpisodeSelection::Numbers(numbers) => Ok(numbers
            .iter()
            .map(|n| (n.to_string(), episode_url(&options.base_episodes_url, *n)))
            .collect()),
        EpisodeSelection::WholeFeed => {
            let entries = fetch_episodes(fetcher, &options.feed_url).await?;
            Ok(entries
                .iter()
                .map(|entry| (episode_label(entry), entry.link.clone()))
                .collect())
        }
    }
}

/// Extract and classify the selected episodes one after the other.
///
/// An episode that can't be fetched or has no show notes section is recorded
/// as a failure and the run moves on. Only a feed that can't be read fails the
/// whole run.
pub async fn execute_run<F: PageFetcher>(
    options: RunOptions,
    directory: SiteDirectory,
    fetcher: &F,
    progress_callback: Option<RunProgressCallback>,
) -> Result<RunOutcome> {
    let targets = episode_targets(&options, fetcher).await?;
    info!("Processing {} episode(s)", targets.len());

    let progress_bar = if options.show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let extractor = LinkExtractor::new(fetcher);
    let classifier = Classifier::new(directory, fetcher).with_footer_filter(options.filter_footer);

    let mut outcome = RunOutcome::default();
    for (idx, (label, url)) in targets.iter().enumerate() {
        if idx > 0 && !options.pause.is_zero() {
            tokio::time::sleep(options.pause).await;
        }

        let message = format!("Episode {} ({}/{}): {}", label, idx + 1, targets.len(), url);
        if let Some(ref pb) = progress_bar {
            pb.set_message(message.clone());
        }
        if let Some(ref callback) = progress_callback {
            callback(message);
        }

        match extractor.extract(url).await {
            Ok(notes) => {
                let result = classifier.classify(&notes).await;
                info!("Episode {}: {} link(s) classified", label, result.total());
                outcome.episodes.push(EpisodeReport {
                    label: label.clone(),
                    url: url.clone(),
                    result,
                });
            }
            Err(e) => {
                warn!("Skipping episode {}: {}", label, e);
                if let Some(ref callback) = progress_callback {
                    callback(format!("[!] Failed to process episode {}: {}", label, e));
                }
                outcome.failures.push(EpisodeFailure {
                    label: label.clone(),
                    url: url.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }

    Ok(outcome)
}
