use crate::category::Category;
use serde::{Deserialize, Serialize};
use shownotes_scanner::Link;
use std::collections::BTreeMap;

/// Links partitioned by category. Every category is present, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    links: BTreeMap<Category, Vec<Link>>,
}

impl ClassificationResult {
    pub fn new() -> Self {
        Self {
            links: Category::ALL.into_iter().map(|c| (c, Vec::new())).collect(),
        }
    }

    pub fn push(&mut self, category: Category, link: Link) {
        self.links.entry(category).or_default().push(link);
    }

    pub fn get(&self, category: Category) -> &[Link] {
        self.links.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    /// Categories in `Category::ALL` order with their links.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[Link])> {
        self.links.iter().map(|(c, links)| (*c, links.as_slice()))
    }

    pub fn total(&self) -> usize {
        self.links.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Append every link of `other`, keeping its category.
    pub fn merge(&mut self, other: ClassificationResult) {
        for (category, links) in other.links {
            self.links.entry(category).or_default().extend(links);
        }
    }
}

impl Default for ClassificationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Classified show notes of one episode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeReport {
    /// Short reference, the episode number when known
    pub label: String,
    pub url: String,
    pub result: ClassificationResult,
}

/// An episode that could not be processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeFailure {
    pub label: String,
    pub url: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunOutcome {
    pub episodes: Vec<EpisodeReport>,
    pub failures: Vec<EpisodeFailure>,
}

impl RunOutcome {
    /// All episodes' links in one partition.
    pub fn aggregate(&self) -> ClassificationResult {
        let mut all = ClassificationResult::new();
        for episode in &self.episodes {
            all.merge(episode.result.clone());
        }
        all
    }
}
