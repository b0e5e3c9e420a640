pub mod error;
pub mod extractor;
pub mod feed;
pub mod fetcher;
pub mod result;

pub use error::ScanError;
pub use extractor::LinkExtractor;
pub use feed::{EpisodeEntry, fetch_episodes, parse_feed};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use result::{FetchedPage, Link, ShowNotes};
