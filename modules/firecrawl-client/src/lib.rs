pub mod error;
pub mod types;

pub use error::{FirecrawlError, Result};
pub use types::{SearchItem, SearchRequest, SearchResponse, SearchScrapeOptions};

use serde_json::{Map, Value};

const BASE_URL: &str = "https://api.firecrawl.dev/v1";

pub struct FirecrawlClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl FirecrawlClient {
    pub fn new(api_key: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Scrape a single URL via /v1/scrape. Returns the provider's document
    /// payload as free-form JSON so callers keep every field the API sends.
    pub async fn scrape(
        &self,
        url: &str,
        formats: &[String],
        overrides: &Map<String, Value>,
    ) -> Result<Value> {
        let body = scrape_payload(url, formats, overrides);

        let resp = self
            .client
            .post(format!("{}/scrape", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(FirecrawlError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: Value = resp.json().await?;
        if payload.get("success").and_then(Value::as_bool) == Some(false) {
            let message = payload
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("Failed to scrape website")
                .to_string();
            return Err(FirecrawlError::Scrape(message));
        }

        tracing::debug!(url, "Firecrawl scrape complete");

        // Older API revisions return the document at the top level instead of
        // under `data`.
        let document = match payload.get("data") {
            Some(data) if !data.is_null() => data.clone(),
            _ => payload,
        };
        Ok(document)
    }

    /// Search via /v1/search. Each hit is scraped for markdown and a
    /// screenshot with main-content-only extraction.
    pub async fn search(&self, query: &str, limit: u32) -> Result<Vec<SearchItem>> {
        let request = SearchRequest {
            query: query.to_string(),
            limit,
            scrape_options: SearchScrapeOptions {
                formats: vec!["markdown".to_string(), "screenshot".to_string()],
                only_main_content: true,
            },
        };

        let resp = self
            .client
            .post(format!("{}/search", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(FirecrawlError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: SearchResponse = resp.json().await?;
        let items = payload.data.unwrap_or_default();
        tracing::debug!(query, count = items.len(), "Firecrawl search complete");
        Ok(items)
    }
}

/// Assemble the /v1/scrape body: fixed defaults first, then every caller
/// override on top, so overrides win even for the defaulted keys.
fn scrape_payload(url: &str, formats: &[String], overrides: &Map<String, Value>) -> Value {
    let mut body = Map::new();
    body.insert("url".to_string(), Value::String(url.to_string()));
    body.insert(
        "formats".to_string(),
        Value::Array(formats.iter().cloned().map(Value::String).collect()),
    );

    // Main-content extraction is on unless the caller explicitly turned it off.
    let only_main_content = overrides
        .get("onlyMainContent")
        .map(|v| v != &Value::Bool(false))
        .unwrap_or(true);
    body.insert("onlyMainContent".to_string(), Value::Bool(only_main_content));
    body.insert("waitFor".to_string(), Value::from(2000));
    body.insert("timeout".to_string(), Value::from(30000));

    for (key, value) in overrides {
        body.insert(key.clone(), value.clone());
    }

    Value::Object(body)
}
