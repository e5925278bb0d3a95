use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scrapegate_api::rest::{build_router, AppState};
use scrapegate_core::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = AppConfig::from_env()?;
    let app = build_router(AppState::new());

    let addr = format!("{}:{}", config.host, config.port);
    info!("Scrapegate API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
