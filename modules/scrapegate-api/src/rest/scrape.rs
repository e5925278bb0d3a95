use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use scrapegate_core::adapters::build_page_scraper;
use scrapegate_core::{config, ScrapeOptions, ScrapeResult};

use super::AppState;

#[derive(Deserialize, Default)]
pub struct ScrapeRequest {
    url: Option<String>,
    formats: Option<Vec<String>>,
    /// Provider options bag, forwarded key by key on top of the credentialed
    /// defaults. The fallback path ignores it.
    options: Option<Map<String, Value>>,
}

pub async fn scrape_website(
    State(state): State<AppState>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let detail = rejection.body_text();
            warn!(error = %detail, "Rejected scrape request body");
            return scrape_error_response(&detail);
        }
    };

    let url = request.url.unwrap_or_default();
    if url.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "URL is required"})),
        )
            .into_response();
    }

    let api_key = config::firecrawl_api_key();
    let scraper = build_page_scraper(&state.http_client, api_key.as_deref());
    let options = ScrapeOptions::new(request.formats, request.options);

    info!(url = %url, provider = scraper.name(), "Scraping website");

    match scraper.scrape(&url, &options).await {
        Ok(result) => (
            StatusCode::OK,
            Json(serde_json::json!({"success": true, "data": result})),
        )
            .into_response(),
        Err(error) => {
            warn!(url = %url, error = %error, "Scrape failed");
            scrape_error_response(&error.to_string())
        }
    }
}

/// Failure envelope: callers always receive a well-formed page object, with
/// the upstream message threaded into the error markdown.
fn scrape_error_response(message: &str) -> Response {
    let message = if message.is_empty() {
        "Failed to scrape website"
    } else {
        message
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "success": false,
            "error": message,
            "data": ScrapeResult::error_page(message),
        })),
    )
        .into_response()
}
