// HTTP client for the headline source page.
//
// A single GET per scrape: no pagination, no retries, no rate limiting.
// Network failures and non-2xx responses come back as errors naming the URL,
// so the UI can show the user which source was unreachable.

use anyhow::{Context, Result};
use scraper::Selector;
use tracing::{debug, info};

use super::extract::{extract_titles, parse_selector};

/// Default source: ScienceDaily's top science news.
pub const DEFAULT_SOURCE_URL: &str = "https://www.sciencedaily.com/news/top/science/";

/// Fetches one page and extracts its headline text.
pub struct HeadlineClient {
    client: reqwest::Client,
    url: String,
    selector: Selector,
}

impl HeadlineClient {
    /// Create a client for `url`, extracting elements matching `selector`.
    pub fn new(url: &str, selector: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("tidings/0.1 (headline-topics)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: url.to_string(),
            selector: parse_selector(selector)?,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the source page and return its headline titles in page order.
    /// A page with no matching headings yields an empty list.
    pub async fn fetch_titles(&self) -> Result<Vec<String>> {
        debug!(url = %self.url, "Fetching headline page");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Could not reach {}", self.url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "{} returned {}: {}",
                self.url,
                status,
                crate::output::truncate_chars(&body, 200)
            );
        }

        let html = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", self.url))?;

        let titles = extract_titles(&html, &self.selector);
        info!(url = %self.url, titles = titles.len(), "Scraped headlines");
        Ok(titles)
    }
}
