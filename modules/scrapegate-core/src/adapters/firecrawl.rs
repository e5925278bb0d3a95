use anyhow::Result;
use async_trait::async_trait;
use firecrawl_client::{FirecrawlClient, SearchItem};
use serde_json::Value;

use crate::provider::{PageScraper, WebSearcher};
use crate::types::{ScrapeOptions, ScrapeResult, SearchResult};

/// Credentialed scrape adapter over the Firecrawl API.
pub struct FirecrawlScraper {
    client: FirecrawlClient,
}

impl FirecrawlScraper {
    pub fn new(api_key: &str, http_client: reqwest::Client) -> Self {
        Self {
            client: FirecrawlClient::new(api_key, http_client),
        }
    }
}

#[async_trait]
impl PageScraper for FirecrawlScraper {
    async fn scrape(&self, url: &str, options: &ScrapeOptions) -> Result<ScrapeResult> {
        let document = self
            .client
            .scrape(url, &options.formats, &options.overrides)
            .await?;
        Ok(normalize_document(document))
    }

    fn name(&self) -> &str {
        "firecrawl"
    }
}

/// Credentialed search adapter over the Firecrawl API.
pub struct FirecrawlSearcher {
    client: FirecrawlClient,
}

impl FirecrawlSearcher {
    pub fn new(api_key: &str, http_client: reqwest::Client) -> Self {
        Self {
            client: FirecrawlClient::new(api_key, http_client),
        }
    }
}

#[async_trait]
impl WebSearcher for FirecrawlSearcher {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<SearchResult>> {
        let items = self.client.search(query, limit).await?;
        Ok(items.into_iter().map(normalize_hit).collect())
    }

    fn name(&self) -> &str {
        "firecrawl"
    }
}

/// Map one search hit into the fixed result shape. Hits come back sparse
/// when scraping a result failed upstream: the URL stands in for a missing
/// or blank title, and an empty screenshot string counts as absent.
fn normalize_hit(item: SearchItem) -> SearchResult {
    let title = match item.title {
        Some(t) if !t.is_empty() => t,
        _ => item.url.clone(),
    };
    SearchResult {
        title,
        description: item.description.unwrap_or_default(),
        screenshot: item.screenshot.filter(|s| !s.is_empty()),
        markdown: item.markdown.unwrap_or_default(),
        url: item.url,
    }
}

/// Map the provider document into the fixed envelope shape. Reads are
/// defensive throughout: the API omits formats that were not requested.
fn normalize_document(document: Value) -> ScrapeResult {
    let metadata = document
        .get("metadata")
        .filter(|m| !m.is_null())
        .cloned()
        .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

    let markdown = text(&document, "markdown");
    let html = text(&document, "html");

    let mut title = text(&metadata, "title");
    if title.is_empty() {
        title = "Untitled".to_string();
    }

    let content = if markdown.is_empty() {
        html.clone()
    } else {
        markdown.clone()
    };

    let screenshot = document
        .get("screenshot")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from);

    let links = document
        .get("links")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    ScrapeResult {
        title,
        content,
        description: text(&metadata, "description"),
        markdown,
        html,
        metadata,
        screenshot,
        links,
        raw: Some(document),
    }
}

fn text(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_full_document() {
        let document = json!({
            "markdown": "# Example\n\nBody text.",
            "html": "<h1>Example</h1><p>Body text.</p>",
            "metadata": {
                "title": "Example Domain",
                "description": "An illustrative page",
                "sourceURL": "https://example.com",
                "statusCode": 200
            },
            "screenshot": "https://cdn.firecrawl.dev/shot.png",
            "links": ["https://example.com/a", "https://example.com/b"]
        });

        let result = normalize_document(document.clone());

        assert_eq!(result.title, "Example Domain");
        assert_eq!(result.content, "# Example\n\nBody text.");
        assert_eq!(result.description, "An illustrative page");
        assert_eq!(result.metadata["sourceURL"], "https://example.com");
        assert_eq!(
            result.screenshot.as_deref(),
            Some("https://cdn.firecrawl.dev/shot.png")
        );
        assert_eq!(result.links.len(), 2);
        assert_eq!(result.raw, Some(document));
    }

    #[test]
    fn empty_document_gets_placeholder_fields() {
        let result = normalize_document(json!({}));

        assert_eq!(result.title, "Untitled");
        assert_eq!(result.content, "");
        assert_eq!(result.markdown, "");
        assert_eq!(result.html, "");
        assert_eq!(result.metadata, json!({}));
        assert_eq!(result.screenshot, None);
        assert!(result.links.is_empty());
    }

    #[test]
    fn content_falls_back_to_html() {
        let result = normalize_document(json!({
            "html": "<p>only html</p>"
        }));

        assert_eq!(result.content, "<p>only html</p>");
    }

    #[test]
    fn blank_metadata_title_becomes_untitled() {
        let result = normalize_document(json!({
            "metadata": { "title": "" }
        }));

        assert_eq!(result.title, "Untitled");
    }

    fn hit(value: serde_json::Value) -> SearchItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn hit_title_falls_back_to_url() {
        let result = normalize_hit(hit(json!({ "url": "https://example.com" })));
        assert_eq!(result.title, "https://example.com");

        let result = normalize_hit(hit(json!({ "url": "https://example.com", "title": "" })));
        assert_eq!(result.title, "https://example.com");
    }

    #[test]
    fn hit_empty_screenshot_counts_as_absent() {
        let result = normalize_hit(hit(json!({
            "url": "https://example.com",
            "screenshot": ""
        })));
        assert_eq!(result.screenshot, None);

        let result = normalize_hit(hit(json!({
            "url": "https://example.com",
            "screenshot": "https://cdn.firecrawl.dev/shot.png"
        })));
        assert_eq!(
            result.screenshot.as_deref(),
            Some("https://cdn.firecrawl.dev/shot.png")
        );
    }

    #[test]
    fn sparse_hit_defaults_text_fields_to_empty() {
        let result = normalize_hit(hit(json!({ "url": "https://example.com" })));

        assert_eq!(result.url, "https://example.com");
        assert_eq!(result.description, "");
        assert_eq!(result.markdown, "");
    }

    #[test]
    fn full_hit_is_carried_through() {
        let result = normalize_hit(hit(json!({
            "url": "https://example.com",
            "title": "Example Domain",
            "description": "An illustrative page",
            "screenshot": "https://cdn.firecrawl.dev/shot.png",
            "markdown": "# Example"
        })));

        assert_eq!(result.title, "Example Domain");
        assert_eq!(result.description, "An illustrative page");
        assert_eq!(result.markdown, "# Example");
    }
}
