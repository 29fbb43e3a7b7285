use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::Result;
use crate::extract::Page;

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Where a listing page's HTML comes from.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn load(&self, url: &str) -> Result<Page>;
}

/// Reads a saved copy of the page; `url` is only attached to the page.
pub struct FilePageSource {
    path: PathBuf,
}

impl FilePageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PageSource for FilePageSource {
    async fn load(&self, url: &str) -> Result<Page> {
        let html = tokio::fs::read_to_string(&self.path).await?;
        debug!(path = %self.path.display(), bytes = html.len(), "Read saved page");
        Ok(Page::parse(url, &html))
    }
}

/// Fetches the live page over HTTP.
pub struct HttpPageSource {
    client: reqwest::Client,
}

impl HttpPageSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpPageSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn load(&self, url: &str) -> Result<Page> {
        info!(url, "Fetching listing page");
        let html = self
            .client
            .get(url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(ACCEPT, "text/html,application/xhtml+xml")
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!(url, bytes = html.len(), "Fetched listing page");
        Ok(Page::parse(url, &html))
    }
}
