use serde::{Deserialize, Serialize};

/// Per-hit scrape settings for the /v1/search request.
#[derive(Debug, Clone, Serialize)]
pub struct SearchScrapeOptions {
    pub formats: Vec<String>,
    #[serde(rename = "onlyMainContent")]
    pub only_main_content: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub limit: u32,
    #[serde(rename = "scrapeOptions")]
    pub scrape_options: SearchScrapeOptions,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Option<Vec<SearchItem>>,
}

/// A single hit from /v1/search. Markdown and screenshot are only present
/// when the corresponding formats were requested.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub screenshot: Option<String>,
    #[serde(default)]
    pub markdown: Option<String>,
}
