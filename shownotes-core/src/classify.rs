//! Link classification.
//!
//! Every link runs through [`RULES`] in order and lands in the first category
//! whose rule accepts it, or in [`Category::Misc`]. A link matching several
//! rules therefore goes to the earliest one: a bookshop page whose text
//! mentions a podcast is a book.

use crate::category::Category;
use crate::directory::{SiteDirectory, netloc};
use crate::model::ClassificationResult;
use crate::probe::PageProbe;
use shownotes_scanner::{Link, PageFetcher, ShowNotes};
use tracing::debug;
use url::Url;

/// A link prepared for the rules: URL parts plus the marketplace probe, if any.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub text: &'a str,
    pub url: &'a str,
    pub netloc: String,
    pub path: String,
    pub probe: Option<PageProbe>,
}

impl<'a> Candidate<'a> {
    pub fn new(text: &'a str, url: &'a str) -> Self {
        let (netloc, path) = match Url::parse(url) {
            Ok(parsed) => (netloc(&parsed), parsed.path().to_string()),
            Err(_) => (String::new(), String::new()),
        };
        Self {
            text,
            url,
            netloc,
            path,
            probe: None,
        }
    }

    pub fn with_probe(mut self, probe: Option<PageProbe>) -> Self {
        self.probe = probe;
        self
    }

    fn probe_says(&self, check: fn(&PageProbe) -> bool) -> bool {
        self.probe.as_ref().is_some_and(check)
    }
}

pub type Rule = fn(&SiteDirectory, &Candidate<'_>) -> bool;

/// Classification rules in priority order.
pub const RULES: [(Category, Rule); 6] = [
    (Category::Film, is_film),
    (Category::Book, is_book),
    (Category::Podcast, is_podcast),
    (Category::WebClip, is_web_clip),
    (Category::Music, is_music),
    (Category::TvShow, is_tv_show),
];

fn is_film(directory: &SiteDirectory, link: &Candidate<'_>) -> bool {
    if let Some(verdict) = directory.path_verdict(&link.netloc, &link.path, Category::Film) {
        return verdict;
    }
    directory.is_listed(Category::Film, &link.netloc) || link.probe_says(PageProbe::is_film)
}

fn is_book(directory: &SiteDirectory, link: &Candidate<'_>) -> bool {
    directory.is_listed(Category::Book, &link.netloc) || link.probe_says(PageProbe::is_book)
}

fn is_podcast(directory: &SiteDirectory, link: &Candidate<'_>) -> bool {
    directory.is_listed(Category::Podcast, &link.netloc)
        || directory.has_podcast_fingerprint(&[link.path.as_str(), link.netloc.as_str(), link.text])
}

fn is_web_clip(directory: &SiteDirectory, link: &Candidate<'_>) -> bool {
    directory.is_listed(Category::WebClip, &link.netloc)
}

fn is_music(directory: &SiteDirectory, link: &Candidate<'_>) -> bool {
    directory.is_listed(Category::Music, &link.netloc) || link.probe_says(PageProbe::is_music)
}

fn is_tv_show(directory: &SiteDirectory, link: &Candidate<'_>) -> bool {
    if let Some(verdict) = directory.path_verdict(&link.netloc, &link.path, Category::TvShow) {
        return verdict;
    }
    directory.is_listed(Category::TvShow, &link.netloc) || link.probe_says(PageProbe::is_tv_show)
}

/// First category whose rule accepts the candidate.
pub fn categorize(directory: &SiteDirectory, candidate: &Candidate<'_>) -> Category {
    RULES
        .iter()
        .find(|(_, rule)| rule(directory, candidate))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Misc)
}

pub struct Classifier<'a, F: PageFetcher> {
    directory: SiteDirectory,
    fetcher: &'a F,
    filter_footer: bool,
}

impl<'a, F: PageFetcher> Classifier<'a, F> {
    pub fn new(directory: SiteDirectory, fetcher: &'a F) -> Self {
        Self {
            directory,
            fetcher,
            filter_footer: true,
        }
    }

    /// Drop sponsor/footer boilerplate before classifying (on by default).
    pub fn with_footer_filter(mut self, enabled: bool) -> Self {
        self.filter_footer = enabled;
        self
    }

    /// Partition `links` by category. Never fails; unreachable marketplace
    /// pages just don't match.
    pub async fn classify(&self, links: &ShowNotes) -> ClassificationResult {
        let mut result = ClassificationResult::new();

        for (text, url) in links {
            if self.filter_footer && self.directory.is_footer_link(url) {
                debug!("Dropping footer link {}", url);
                continue;
            }

            let category = self.categorize(text, url).await;
            debug!("{} [{}] -> {}", text, url, category);
            result.push(category, Link::new(text.as_str(), url.as_str()));
        }

        result
    }

    /// Category of a single link, probing the page when the host is a marketplace.
    pub async fn categorize(&self, text: &str, url: &str) -> Category {
        let mut candidate = Candidate::new(text, url);
        if self.directory.is_marketplace(&candidate.netloc) {
            candidate.probe = PageProbe::fetch(self.fetcher, url).await;
        }
        categorize(&self.directory, &candidate)
    }
}
