use anyhow::{Context, Result};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    /// Startup snapshot of the provider credential, for diagnostics only.
    /// Provider selection re-reads the environment on every request via
    /// [`firecrawl_api_key`].
    pub firecrawl_api_key: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("API_PORT must be a port number")?,
            firecrawl_api_key: firecrawl_api_key(),
        };

        config.log_keys();
        Ok(config)
    }

    fn log_keys(&self) {
        tracing::info!("Config loaded:");
        tracing::info!(
            "  FIRECRAWL_API_KEY: {}",
            preview_opt(&self.firecrawl_api_key)
        );
    }
}

/// Current provider credential. Read from the environment on every call:
/// key presence is the provider-selection switch and may change under a
/// running process, so the decision is never cached.
pub fn firecrawl_api_key() -> Option<String> {
    non_empty(std::env::var("FIRECRAWL_API_KEY").ok())
}

/// Empty counts as unset: a blank `FIRECRAWL_API_KEY=` line in a .env file
/// must not select the credentialed provider.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// First five characters of a secret plus its length. Counts characters,
/// not bytes: a key may hold multi-byte UTF-8.
fn preview_opt(val: &Option<String>) -> String {
    match val {
        Some(v) if !v.is_empty() => {
            let prefix: String = v.chars().take(5).collect();
            format!("{}...({} chars)", prefix, v.chars().count())
        }
        _ => "<not set>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_credential_counts_as_absent() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(
            non_empty(Some("fc-live".to_string())),
            Some("fc-live".to_string())
        );
    }

    #[test]
    fn preview_redacts_and_counts_characters() {
        assert_eq!(
            preview_opt(&Some("fc-1234567890".to_string())),
            "fc-12...(13 chars)"
        );
        assert_eq!(preview_opt(&None), "<not set>");
        assert_eq!(preview_opt(&Some(String::new())), "<not set>");
    }

    #[test]
    fn preview_survives_multibyte_keys() {
        assert_eq!(
            preview_opt(&Some("ключи-код".to_string())),
            "ключи...(9 chars)"
        );
    }
}
