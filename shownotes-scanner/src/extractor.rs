//! Show-notes link extraction.
//!
//! Episode pages don't share one layout, so the show-notes section is located by
//! trying a short list of structural strategies in order. The first strategy that
//! yields anchors wins.

use crate::error::{Result, ScanError};
use crate::fetcher::PageFetcher;
use crate::result::ShowNotes;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

/// An anchor as found in the page, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub text: String,
    pub href: Option<String>,
}

/// Returns the anchors of the show-notes section, or `None` if the page doesn't
/// have the structure the strategy looks for.
pub type LocateStrategy = fn(&Html) -> Option<Vec<Anchor>>;

/// Strategies in the order they are attempted.
pub const STRATEGIES: [(&str, LocateStrategy); 3] = [
    ("heading sibling", heading_sibling),
    ("first list", first_list),
    ("preformatted paragraphs", preformatted_paragraphs),
];

/// Run the strategies in order and return the anchors of the first one that applies.
pub fn locate_show_notes(document: &Html) -> Option<Vec<Anchor>> {
    for (name, strategy) in STRATEGIES {
        match strategy(document) {
            Some(anchors) => {
                debug!("Show notes located by '{}' ({} anchors)", name, anchors.len());
                return Some(anchors);
            }
            None => debug!("Strategy '{}' not applicable", name),
        }
    }
    None
}

/// First `h3`, then its next element: a list holds the links directly, a paragraph
/// is an intro and the links live in the element after it.
fn heading_sibling(document: &Html) -> Option<Vec<Anchor>> {
    let heading_selector = Selector::parse("h3").unwrap();
    let heading = document.select(&heading_selector).next()?;
    let sibling = next_element(heading)?;

    let container = match sibling.value().name() {
        "ul" | "ol" => sibling,
        "p" => next_element(sibling)?,
        _ => return None,
    };

    non_empty(anchors_in(container))
}

fn first_list(document: &Html) -> Option<Vec<Anchor>> {
    let list_selector = Selector::parse("ul").unwrap();
    let list = document.select(&list_selector).next()?;
    non_empty(anchors_in(list))
}

fn preformatted_paragraphs(document: &Html) -> Option<Vec<Anchor>> {
    let paragraph_selector = Selector::parse("p[style]").unwrap();
    let anchors: Vec<Anchor> = document
        .select(&paragraph_selector)
        .filter(|p| p.value().attr("style").is_some_and(is_pre_wrap))
        .flat_map(anchors_in)
        .collect();
    non_empty(anchors)
}

fn is_pre_wrap(style: &str) -> bool {
    let compact: String = style
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    compact.contains("white-space:pre-wrap")
}

fn next_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

fn anchors_in(container: ElementRef<'_>) -> Vec<Anchor> {
    let anchor_selector = Selector::parse("a").unwrap();
    container
        .select(&anchor_selector)
        .map(|a| Anchor {
            text: a.text().collect::<String>().trim().to_string(),
            href: a.value().attr("href").map(|h| h.trim().to_string()),
        })
        .collect()
}

fn non_empty(anchors: Vec<Anchor>) -> Option<Vec<Anchor>> {
    if anchors.is_empty() { None } else { Some(anchors) }
}

/// Accept only absolute http(s) URLs with a host.
pub fn validate_url(candidate: &str) -> Result<Url> {
    let url = Url::parse(candidate)
        .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", candidate, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ScanError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            candidate,
            url.scheme()
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ScanError::InvalidUrl(format!("{}: missing host", candidate)));
    }

    Ok(url)
}

pub struct LinkExtractor<'a, F: PageFetcher> {
    fetcher: &'a F,
}

impl<'a, F: PageFetcher> LinkExtractor<'a, F> {
    pub fn new(fetcher: &'a F) -> Self {
        Self { fetcher }
    }

    /// Fetch an episode page and extract its show-notes links.
    ///
    /// A non-2xx page is an error page, not show notes.
    pub async fn extract(&self, page_url: &str) -> Result<ShowNotes> {
        info!("Extracting show notes from {}", page_url);
        let page = self.fetcher.fetch(page_url).await?;
        if !(200..300).contains(&page.status_code) {
            return Err(ScanError::Status {
                url: page_url.to_string(),
                status: page.status_code,
            });
        }
        self.extract_from_html(page_url, &page.body).await
    }

    /// Extract show-notes links from an already fetched page.
    ///
    /// Fails with [`ScanError::Structure`] when no strategy finds the section.
    /// Malformed hrefs are skipped and unreachable links keep their original URL.
    pub async fn extract_from_html(&self, page_url: &str, html: &str) -> Result<ShowNotes> {
        let anchors = {
            let document = Html::parse_document(html);
            locate_show_notes(&document)
        }
        .ok_or_else(|| ScanError::Structure {
            url: page_url.to_string(),
        })?;

        let mut notes = ShowNotes::new();
        for anchor in anchors {
            let Some(href) = anchor.href else {
                debug!("Anchor '{}' has no href, skipping", anchor.text);
                continue;
            };

            if let Err(e) = validate_url(&href) {
                info!("Not a valid URL, ignoring: {}", e);
                continue;
            }

            let resolved = self.resolve_or_keep(&href).await;
            if let Some(previous) = notes.insert(anchor.text.clone(), resolved) {
                debug!(
                    "Duplicate link text '{}', replacing {}",
                    anchor.text, previous
                );
            }
        }

        Ok(notes)
    }

    async fn resolve_or_keep(&self, url: &str) -> String {
        match self.fetcher.resolve(url).await {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!("Could not resolve {}, keeping it as is: {}", url, e);
                url.to_string()
            }
        }
    }
}
