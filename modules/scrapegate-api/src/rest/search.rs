use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use tracing::{info, warn};

use scrapegate_core::adapters::build_web_searcher;
use scrapegate_core::config;

use super::AppState;

/// Result count requested from the credentialed provider. The fallback path
/// enforces the same bound through its own parser cap.
pub const SEARCH_LIMIT: u32 = 10;

#[derive(Deserialize, Default)]
pub struct SearchRequest {
    query: Option<String>,
}

pub async fn search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected search request body");
            return search_error_response();
        }
    };

    let query = request.query.unwrap_or_default();
    if query.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Query is required"})),
        )
            .into_response();
    }

    let api_key = config::firecrawl_api_key();
    let searcher = build_web_searcher(&state.http_client, api_key.as_deref());

    info!(query = %query, provider = searcher.name(), "Searching the web");

    match searcher.search(&query, SEARCH_LIMIT).await {
        Ok(results) => (
            StatusCode::OK,
            Json(serde_json::json!({"results": results})),
        )
            .into_response(),
        Err(error) => {
            warn!(query = %query, error = %error, "Search failed");
            search_error_response()
        }
    }
}

/// Failure envelope. Unlike the scrape endpoint this deliberately drops the
/// upstream detail: callers get a fixed message and no partial results.
fn search_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"error": "Failed to perform search"})),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn request_tolerates_null_query() {
        let request: SearchRequest = serde_json::from_str(r#"{"query":null}"#).unwrap();
        assert_eq!(request.query, None);

        let request: SearchRequest = serde_json::from_str(r#"{"query":"rust"}"#).unwrap();
        assert_eq!(request.query.as_deref(), Some("rust"));
    }

    #[tokio::test]
    async fn missing_query_is_rejected() {
        let state = AppState::new();
        let response = search(State(state), Ok(Json(SearchRequest::default()))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Query is required");
    }

    #[tokio::test]
    async fn error_response_is_generic() {
        let response = search_error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body, serde_json::json!({"error": "Failed to perform search"}));
    }
}
