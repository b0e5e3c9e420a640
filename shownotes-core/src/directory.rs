//! Known sites per category.
//!
//! A [`SiteDirectory`] is plain data handed to the classifier. The built-in
//! lists come from [`SiteDirectory::default`]; a JSON file can override any of
//! its fields.

use crate::category::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Failed to read site directory {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid site directory: {0}")]
    Json(#[from] serde_json::Error),
}

/// On `host`, a path containing `marker` means `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRule {
    pub host: String,
    pub marker: String,
    pub category: Category,
}

impl PathRule {
    pub fn new(host: &str, marker: &str, category: Category) -> Self {
        Self {
            host: host.to_string(),
            marker: marker.to_string(),
            category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteDirectory {
    pub film: BTreeSet<String>,
    pub book: BTreeSet<String>,
    pub podcast: BTreeSet<String>,
    pub web_clip: BTreeSet<String>,
    pub music: BTreeSet<String>,
    pub tv_show: BTreeSet<String>,
    /// Hosts serving several categories, told apart by path
    pub path_rules: Vec<PathRule>,
    /// Substrings that mark a podcast when found in the URL or the link text
    pub podcast_fingerprints: Vec<String>,
    /// General stores whose product pages need a probe to classify
    pub marketplaces: BTreeSet<String>,
    /// Sponsor and footer URLs that are never show notes
    pub footer_links: BTreeSet<String>,
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

const ROTTEN_TOMATOES: &str = "www.rottentomatoes.com";
const ABC_AUSTRALIA: &str = "www.abc.net.au";

impl Default for SiteDirectory {
    fn default() -> Self {
        Self {
            film: set(&["www.imdb.com", ROTTEN_TOMATOES]),
            book: set(&[
                "www.booktopia.com",
                "www.booktopia.com.au",
                "www.bookdepository.com",
                "www.bookdepository.com.au",
                "www.readings.com.au",
            ]),
            podcast: set(&[
                "itunes.apple.com",
                "www.wbez.org",
                "www.npr.org",
                "libsyn.com",
                "www.thisamericanlife.org",
                "www.gimletmedia.com",
                "www.wnycstudios.org",
                "thedollop.net",
                "thedollop.libsyn.com",
                "www.mydadwroteaporno.com",
                "revisionisthistory.com",
            ]),
            web_clip: set(&["www.youtube.com", "www.vimeo.com", "www.dailymotion.com"]),
            music: set(&["music.apple.com", "bandcamp.com", "soundcloud.com"]),
            tv_show: set(&[
                "www.stan.com.au",
                "www.netflix.com",
                "iview.abc.net.au",
                "tenplay.com.au",
                "www.funnyordie.com",
                "www.sbs.com.au",
            ]),
            path_rules: vec![
                PathRule::new(ROTTEN_TOMATOES, "/m/", Category::Film),
                PathRule::new(ROTTEN_TOMATOES, "/tv/", Category::TvShow),
                PathRule::new(ABC_AUSTRALIA, "/tv/", Category::TvShow),
            ],
            podcast_fingerprints: vec!["podcast".to_string(), "radio".to_string()],
            marketplaces: set(&["www.amazon.com", "www.amazon.com.au"]),
            footer_links: set(&[
                "https://www.twenty07.com/",
                "https://www.boxerandco.com.au/",
                "https://www.stephenblake.com.au/",
                "https://diamantina.com.au/",
            ]),
        }
    }
}

impl SiteDirectory {
    /// A directory that knows no sites at all.
    pub fn empty() -> Self {
        Self {
            film: BTreeSet::new(),
            book: BTreeSet::new(),
            podcast: BTreeSet::new(),
            web_clip: BTreeSet::new(),
            music: BTreeSet::new(),
            tv_show: BTreeSet::new(),
            path_rules: Vec::new(),
            podcast_fingerprints: Vec::new(),
            marketplaces: BTreeSet::new(),
            footer_links: BTreeSet::new(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, DirectoryError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, DirectoryError> {
        let content = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn with_site(mut self, category: Category, host: &str) -> Self {
        if let Some(sites) = self.sites_mut(category) {
            sites.insert(host.to_string());
        }
        self
    }

    pub fn with_path_rule(mut self, rule: PathRule) -> Self {
        self.path_rules.push(rule);
        self
    }

    pub fn with_marketplace(mut self, host: &str) -> Self {
        self.marketplaces.insert(host.to_string());
        self
    }

    pub fn with_fingerprint(mut self, fingerprint: &str) -> Self {
        self.podcast_fingerprints.push(fingerprint.to_string());
        self
    }

    pub fn with_footer_link(mut self, url: &str) -> Self {
        self.footer_links.insert(url.to_string());
        self
    }

    /// Directory entries for `category`; `Misc` has none.
    pub fn sites(&self, category: Category) -> Option<&BTreeSet<String>> {
        match category {
            Category::Film => Some(&self.film),
            Category::Book => Some(&self.book),
            Category::Podcast => Some(&self.podcast),
            Category::WebClip => Some(&self.web_clip),
            Category::Music => Some(&self.music),
            Category::TvShow => Some(&self.tv_show),
            Category::Misc => None,
        }
    }

    fn sites_mut(&mut self, category: Category) -> Option<&mut BTreeSet<String>> {
        match category {
            Category::Film => Some(&mut self.film),
            Category::Book => Some(&mut self.book),
            Category::Podcast => Some(&mut self.podcast),
            Category::WebClip => Some(&mut self.web_clip),
            Category::Music => Some(&mut self.music),
            Category::TvShow => Some(&mut self.tv_show),
            Category::Misc => None,
        }
    }

    pub fn is_listed(&self, category: Category, netloc: &str) -> bool {
        self.sites(category).is_some_and(|sites| sites.contains(netloc))
    }

    /// For hosts with path rules, whether `path` carries the marker for
    /// `category`. `None` when the host has no path rules at all.
    pub fn path_verdict(&self, netloc: &str, path: &str, category: Category) -> Option<bool> {
        let mut rules = self.path_rules.iter().filter(|r| r.host == netloc).peekable();
        rules.peek()?;
        Some(rules.any(|r| r.category == category && path.contains(&r.marker)))
    }

    /// Case-insensitive search for any podcast fingerprint in `haystacks`.
    pub fn has_podcast_fingerprint(&self, haystacks: &[&str]) -> bool {
        let haystacks: Vec<String> = haystacks.iter().map(|h| h.to_lowercase()).collect();
        self.podcast_fingerprints.iter().any(|fingerprint| {
            let fingerprint = fingerprint.to_lowercase();
            haystacks.iter().any(|h| h.contains(&fingerprint))
        })
    }

    pub fn is_marketplace(&self, netloc: &str) -> bool {
        self.marketplaces.contains(netloc)
    }

    pub fn is_footer_link(&self, url: &str) -> bool {
        self.footer_links.contains(url)
    }
}

/// Host plus explicit port, the form directory entries are written in.
pub fn netloc(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}
