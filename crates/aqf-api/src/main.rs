//! # aqf-api — Binary Entry Point
//!
//! Starts the Axum HTTP server. Binds to a configurable port (default
//! 8080). Uses Postgres when `DATABASE_URL` is set, otherwise an
//! in-memory store.

use std::sync::Arc;

use anyhow::Context;

use aqf_api::state::{AppConfig, AppState};
use aqf_store::{MemoryStore, PgStore, RequestStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let config = AppConfig { port };

    // Database pool is optional — absent means in-memory only.
    let db_pool = aqf_store::init_pool()
        .await
        .context("database initialization failed")?;

    let store: Arc<dyn RequestStore> = match &db_pool {
        Some(pool) => {
            tracing::info!("using Postgres request store");
            Arc::new(PgStore::new(pool.clone()))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, requests will not survive restarts");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::new(store, db_pool, config);
    let app = aqf_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("AquaFlow API listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
