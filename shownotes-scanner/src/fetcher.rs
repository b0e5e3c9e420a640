use crate::error::Result;
use crate::result::FetchedPage;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;

/// Browser user agent; marketplace pages serve a stripped page to unknown clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_10_3) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/54.0.2840.71 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Source of HTML pages.
///
/// Fetches happen one at a time; implementations don't need to be shareable
/// across tasks.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// GET `url`, following redirects.
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;

    /// Final URL reached from `url` after redirects.
    async fn resolve(&self, url: &str) -> Result<String> {
        Ok(self.fetch(url).await?.url)
    }
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Self::with_options(timeout, DEFAULT_USER_AGENT)
    }

    pub fn with_options(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(timeout / 2)
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        debug!("Fetching {}", url);

        let start = Instant::now();
        let response = self.client.get(url).send().await?;
        let final_url = response.url().to_string();
        let status_code = response.status().as_u16();
        let body = response.text().await?;

        debug!(
            "Fetched {} -> {} ({}) in {:?}",
            url,
            final_url,
            status_code,
            start.elapsed()
        );
        Ok(FetchedPage::new(final_url, status_code, body))
    }

    async fn resolve(&self, url: &str) -> Result<String> {
        // Headers are enough to know where the redirects ended up.
        let response = self.client.get(url).send().await?;
        Ok(response.url().to_string())
    }
}
