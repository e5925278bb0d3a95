use axum::http::{header, Method, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod scrape;
pub mod search;

/// Shared per-process state. The HTTP client is cheap to clone and reused
/// across requests; provider credentials are deliberately NOT part of the
/// state because selection re-reads the environment on every request.
#[derive(Clone)]
pub struct AppState {
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_router(state: AppState) -> Router {
    // Browser callers hit these endpoints cross-origin, so preflights must
    // clear POST with a JSON content type from any origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // REST API. The CORS layer only intercepts true preflights; a plain
        // OPTIONS request lands here and is answered directly.
        .route(
            "/api/scrape-website",
            post(scrape::scrape_website).options(|| async { StatusCode::OK }),
        )
        .route(
            "/api/search",
            post(search::search).options(|| async { StatusCode::OK }),
        )
        .with_state(state)
        .layer(cors)
        // Logging layer: method + path + status + latency only
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}
