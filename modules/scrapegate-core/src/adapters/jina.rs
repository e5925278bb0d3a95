use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::json;

use crate::provider::PageScraper;
use crate::types::{ScrapeOptions, ScrapeResult};
use crate::{screenshot_url, USER_AGENT};

const READER_BASE: &str = "https://r.jina.ai";

/// Name recorded in result metadata so callers can tell a fallback scrape
/// from a credentialed one.
const SCRAPER_NAME: &str = "jina-reader-fallback";

/// Reader-proxy fallback scraper. The proxy returns plain markdown with no
/// structured metadata, so title and description come from a line heuristic
/// and the HTML field stays empty.
pub struct JinaReaderScraper {
    client: reqwest::Client,
}

impl JinaReaderScraper {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageScraper for JinaReaderScraper {
    async fn scrape(&self, url: &str, _options: &ScrapeOptions) -> Result<ScrapeResult> {
        let response = self
            .client
            .get(reader_url(url))
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            bail!("Jina Reader error: {}", status.as_u16());
        }

        let markdown = response.text().await?;
        let (title, description) = extract_markdown_metadata(&markdown);
        let metadata = fallback_metadata(url, &title, &description);

        Ok(ScrapeResult {
            title,
            content: markdown.clone(),
            description,
            markdown,
            html: String::new(),
            metadata,
            screenshot: Some(screenshot_url(url)),
            links: Vec::new(),
            raw: None,
        })
    }

    fn name(&self) -> &str {
        SCRAPER_NAME
    }
}

/// Metadata block standing in for what a structured provider would return.
fn fallback_metadata(url: &str, title: &str, description: &str) -> serde_json::Value {
    json!({
        "title": title,
        "description": description,
        "sourceURL": url,
        "statusCode": 200,
        "scraper": SCRAPER_NAME,
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Reader URL for a target: scheme stripped, always forwarded as http. The
/// proxy follows the upgrade itself.
fn reader_url(url: &str) -> String {
    let stripped = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    format!("{READER_BASE}/http://{stripped}")
}

/// Derive (title, description) from reader markdown: the first `# ` line is
/// the title (marker stripped, `"Untitled"` when absent), the first
/// non-heading non-empty line is the description (empty when absent).
fn extract_markdown_metadata(markdown: &str) -> (String, String) {
    let lines: Vec<&str> = markdown
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let title = lines
        .iter()
        .find(|line| line.starts_with("# "))
        .map(|line| line.trim_start_matches('#').trim_start().to_string())
        .unwrap_or_else(|| "Untitled".to_string());

    let description = lines
        .iter()
        .find(|line| !line.starts_with('#'))
        .map(|line| line.to_string())
        .unwrap_or_default();

    (title, description)
}
