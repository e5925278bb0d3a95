pub mod adapters;
pub mod config;
pub mod provider;
pub mod types;

pub use config::AppConfig;
pub use provider::{PageScraper, WebSearcher};
pub use types::*;

/// Outbound user-agent for the free-tier fetchers. Identifies the service to
/// upstream operators without pretending to be a browser session.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (compatible; Scrapegate/1.0; +https://github.com/scrapegate/scrapegate)";

/// Screenshot URL synthesized from the thum.io rendering service. Both
/// fallback paths use it since neither produces a real capture.
pub fn screenshot_url(url: &str) -> String {
    format!("https://image.thum.io/get/width/1280/noanimate/{url}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screenshot_url_templates_target() {
        assert_eq!(
            screenshot_url("https://example.com"),
            "https://image.thum.io/get/width/1280/noanimate/https://example.com"
        );
    }
}
