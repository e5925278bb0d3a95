use std::sync::LazyLock;

use anyhow::{bail, Result};
use async_trait::async_trait;
use regex::Regex;
use url::Url;

use crate::provider::WebSearcher;
use crate::types::SearchResult;
use crate::{screenshot_url, USER_AGENT};

const HTML_ENDPOINT: &str = "https://duckduckgo.com/html/";
const ENGINE_ORIGIN: &str = "https://duckduckgo.com";

/// Hard cap on extracted results, regardless of how many blocks the page has.
const RESULT_CAP: usize = 10;

static RESULT_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<div class="result__body">(.*?)</div>\s*</div>"#).unwrap());
static RESULT_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a[^>]*class="result__a"[^>]*href="([^"]+)"[^>]*>(.*?)</a>"#).unwrap()
});
static SNIPPET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<a[^>]*class="result__snippet"[^>]*>(.*?)</a>|<div[^>]*class="result__snippet"[^>]*>(.*?)</div>"#,
    )
    .unwrap()
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Search-results-page fallback: fetches the public HTML SERP and extracts
/// result blocks with a bounded single-pass regex scan.
pub struct DuckDuckGoSearcher {
    client: reqwest::Client,
}

impl DuckDuckGoSearcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WebSearcher for DuckDuckGoSearcher {
    async fn search(&self, query: &str, _limit: u32) -> Result<Vec<SearchResult>> {
        let response = self
            .client
            .get(HTML_ENDPOINT)
            .query(&[("q", query)])
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            bail!("DuckDuckGo fallback failed with status {}", status.as_u16());
        }

        let html = response.text().await?;
        Ok(parse_results(&html))
    }

    fn name(&self) -> &str {
        "duckduckgo-fallback"
    }
}

/// Single pass over the results page. A block without an extractable link is
/// dropped silently; the scan stops once the page is exhausted or the cap is
/// reached. An unrecognized page yields an empty list, never an error.
fn parse_results(html: &str) -> Vec<SearchResult> {
    let mut results = Vec::new();

    for block in RESULT_BLOCK_RE.captures_iter(html) {
        if results.len() >= RESULT_CAP {
            break;
        }
        let body = &block[1];

        let link = match RESULT_LINK_RE.captures(body) {
            Some(caps) => caps,
            None => continue,
        };
        let raw_url = &link[1];
        let title = TAG_RE.replace_all(&link[2], "").trim().to_string();

        let description = SNIPPET_RE
            .captures(body)
            .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| TAG_RE.replace_all(m.as_str(), "").trim().to_string())
            .unwrap_or_default();

        let url = resolve_redirect(raw_url);
        results.push(SearchResult {
            title: if title.is_empty() { url.clone() } else { title },
            description,
            screenshot: Some(screenshot_url(&url)),
            markdown: String::new(),
            url,
        });
    }

    results
}

/// Unwrap the engine's click-tracking redirect. The href is resolved against
/// the engine origin (hrefs are usually protocol-relative), and the `uddg`
/// query parameter, when present, is the true destination. Any parse failure
/// keeps the raw href untouched.
fn resolve_redirect(raw: &str) -> String {
    let joined = Url::parse(ENGINE_ORIGIN).and_then(|base| base.join(raw));
    match joined {
        Ok(parsed) => parsed
            .query_pairs()
            .find(|(key, value)| key == "uddg" && !value.is_empty())
            .map(|(_, value)| value.into_owned())
            .unwrap_or_else(|| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}
