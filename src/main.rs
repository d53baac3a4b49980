//! Binary entry point: configure, pick a store, serve

use anyhow::Result;
use heroes_api::config::AppConfig;
use heroes_api::server::{build_router, AppState};
use heroes_api::store::{HeroStore, MemoryStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    let store = build_store(&config).await?;
    let app = build_router(AppState { store });

    let listener = TcpListener::bind(&config.addr).await?;
    tracing::info!("Server listening on {}", config.addr);

    axum::serve(listener, app).await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn build_store(config: &AppConfig) -> Result<Arc<dyn HeroStore>> {
    #[cfg(feature = "sqlite")]
    if let Some(url) = &config.database_url {
        let pool = sqlx::SqlitePool::connect(url).await?;
        heroes_api::store::ensure_schema(&pool).await?;
        tracing::info!("Using SQLite store at {}", url);
        return Ok(Arc::new(heroes_api::store::SqliteStore::new(pool)));
    }

    #[cfg(not(feature = "sqlite"))]
    if config.database_url.is_some() {
        tracing::warn!("database_url is set but the 'sqlite' feature is disabled");
    }

    tracing::info!("Using in-memory store");
    Ok(Arc::new(MemoryStore::new()))
}
