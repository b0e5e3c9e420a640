//! Marketplace product page inspection.
//!
//! A marketplace host alone says nothing about what a link points at, so the
//! product page is fetched and a handful of markers are read from it.

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use shownotes_scanner::PageFetcher;
use tracing::{debug, warn};

const FILM_SUB_PAGE_TYPE: &str = "Movie";
const TV_SUB_PAGE_TYPE: &str = "TVSeason";
const FILM_STORE_ID: &str = "movies-tv";
const BOOK_STORE_ID: &str = "books";
const MUSIC_STORE_IDS: [&str; 2] = ["music", "dmusic"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageProbe {
    /// `data-sub-page-type` of `#pageData`
    pub sub_page_type: Option<String>,
    /// `value` of `#storeID`
    pub store_id: Option<String>,
    /// `#booksTitle` is present (ebook pages)
    pub has_books_title: bool,
    /// `img.ap-author-image` is present (author pages)
    pub has_author_image: bool,
}

impl PageProbe {
    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);

        let page_data = Selector::parse("#pageData").unwrap();
        let store_id = Selector::parse("#storeID").unwrap();
        let books_title = Selector::parse("#booksTitle").unwrap();
        let author_image = Selector::parse("img.ap-author-image").unwrap();

        Self {
            sub_page_type: document
                .select(&page_data)
                .next()
                .and_then(|e| e.value().attr("data-sub-page-type"))
                .map(str::to_string),
            store_id: document
                .select(&store_id)
                .next()
                .and_then(|e| e.value().attr("value"))
                .map(str::to_string),
            has_books_title: document.select(&books_title).next().is_some(),
            has_author_image: document.select(&author_image).next().is_some(),
        }
    }

    /// Fetch and inspect `url`. A failed fetch is logged and yields `None`.
    pub async fn fetch<F: PageFetcher>(fetcher: &F, url: &str) -> Option<Self> {
        match fetcher.fetch(url).await {
            Ok(page) => {
                let probe = Self::from_html(&page.body);
                debug!("Probed {}: {:?}", url, probe);
                Some(probe)
            }
            Err(e) => {
                warn!("Marketplace probe of {} failed: {}", url, e);
                None
            }
        }
    }

    pub fn is_film(&self) -> bool {
        self.sub_page_type.as_deref() == Some(FILM_SUB_PAGE_TYPE)
            || self.store_id.as_deref() == Some(FILM_STORE_ID)
    }

    pub fn is_tv_show(&self) -> bool {
        self.sub_page_type.as_deref() == Some(TV_SUB_PAGE_TYPE)
    }

    pub fn is_book(&self) -> bool {
        self.store_id.as_deref() == Some(BOOK_STORE_ID)
            || self.has_books_title
            || self.has_author_image
    }

    pub fn is_music(&self) -> bool {
        self.store_id
            .as_deref()
            .is_some_and(|id| MUSIC_STORE_IDS.contains(&id))
    }
}
