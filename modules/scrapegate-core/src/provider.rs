use crate::types::{ScrapeOptions, ScrapeResult, SearchResult};
use anyhow::Result;
use async_trait::async_trait;

/// Single-page scraper. Every adapter produces a normalized `ScrapeResult`.
#[async_trait]
pub trait PageScraper: Send + Sync {
    /// Fetch one URL and normalize its content.
    async fn scrape(&self, url: &str, options: &ScrapeOptions) -> Result<ScrapeResult>;

    /// Adapter name (for logging).
    fn name(&self) -> &str;
}

/// Web search over an upstream provider.
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Search and return ranked results. `limit` is forwarded to providers
    /// that honor it; the fallback applies its own fixed cap instead.
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<SearchResult>>;

    /// Adapter name (for logging).
    fn name(&self) -> &str;
}
