use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Normalized scrape payload produced by both provider paths. Every key is
/// always serialized (empty string / empty list / null when missing) except
/// `raw`, which only the credentialed path carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub title: String,
    pub content: String,
    pub description: String,
    pub markdown: String,
    pub html: String,
    /// Provider metadata, passed through verbatim on the credentialed path
    /// and synthesized on the fallback path.
    pub metadata: Value,
    pub screenshot: Option<String>,
    pub links: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

impl ScrapeResult {
    /// Degraded payload for the scrape error envelope. Every renderable field
    /// carries an error notice so callers can display it without branching on
    /// the success flag.
    pub fn error_page(message: &str) -> Self {
        Self {
            title: "Error".to_string(),
            content: "Unable to scrape website".to_string(),
            description: "Error occurred while scraping".to_string(),
            markdown: format!("# Error\n\n{message}"),
            html: format!("<h1>Error</h1><p>{message}</p>"),
            metadata: serde_json::json!({
                "title": "Error",
                "description": "Failed to scrape website",
                "statusCode": 500,
            }),
            screenshot: None,
            links: Vec::new(),
            raw: None,
        }
    }
}

/// A single ranked search hit. Sequence order is upstream relevance order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    pub description: String,
    pub screenshot: Option<String>,
    pub markdown: String,
}

/// Caller-supplied scrape tuning, forwarded to the credentialed provider.
/// The fallback path ignores it.
#[derive(Debug, Clone, Default)]
pub struct ScrapeOptions {
    pub formats: Vec<String>,
    /// Free-form provider options; keys here override the provider defaults.
    pub overrides: Map<String, Value>,
}

impl ScrapeOptions {
    pub fn new(formats: Option<Vec<String>>, overrides: Option<Map<String, Value>>) -> Self {
        Self {
            formats: formats
                .unwrap_or_else(|| vec!["markdown".to_string(), "html".to_string()]),
            overrides: overrides.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_page_renders_message_everywhere() {
        let page = ScrapeResult::error_page("Jina Reader error: 502");

        assert_eq!(page.title, "Error");
        assert_eq!(page.content, "Unable to scrape website");
        assert_eq!(page.markdown, "# Error\n\nJina Reader error: 502");
        assert_eq!(page.html, "<h1>Error</h1><p>Jina Reader error: 502</p>");
        assert_eq!(page.metadata["statusCode"], 500);
        assert!(page.links.is_empty());
    }

    #[test]
    fn raw_is_omitted_from_serialization_when_absent() {
        let value = serde_json::to_value(ScrapeResult::error_page("boom")).unwrap();

        assert!(value.get("raw").is_none());
        // The rest of the envelope always serializes, null included.
        assert_eq!(value["screenshot"], Value::Null);
        assert_eq!(value["links"], serde_json::json!([]));
    }

    #[test]
    fn scrape_options_default_formats() {
        let options = ScrapeOptions::new(None, None);
        assert_eq!(options.formats, vec!["markdown", "html"]);
        assert!(options.overrides.is_empty());

        let options = ScrapeOptions::new(Some(vec!["links".to_string()]), None);
        assert_eq!(options.formats, vec!["links"]);
    }
}
