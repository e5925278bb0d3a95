pub mod duckduckgo;
pub mod firecrawl;
pub mod jina;

use std::sync::Arc;

use crate::provider::{PageScraper, WebSearcher};

/// Pick the scrape provider for one request: the credentialed API when a key
/// is present, the reader-proxy fallback otherwise.
pub fn build_page_scraper(
    http_client: &reqwest::Client,
    firecrawl_api_key: Option<&str>,
) -> Arc<dyn PageScraper> {
    match firecrawl_api_key {
        Some(key) => Arc::new(firecrawl::FirecrawlScraper::new(key, http_client.clone())),
        None => Arc::new(jina::JinaReaderScraper::new(http_client.clone())),
    }
}

/// Pick the search provider for one request, on the same credential switch as
/// [`build_page_scraper`].
pub fn build_web_searcher(
    http_client: &reqwest::Client,
    firecrawl_api_key: Option<&str>,
) -> Arc<dyn WebSearcher> {
    match firecrawl_api_key {
        Some(key) => Arc::new(firecrawl::FirecrawlSearcher::new(key, http_client.clone())),
        None => Arc::new(duckduckgo::DuckDuckGoSearcher::new(http_client.clone())),
    }
}
