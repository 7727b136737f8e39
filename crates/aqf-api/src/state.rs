//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Holds the lifecycle manager, the
//! notification sink transition events are forwarded to, the optional
//! database pool (health checks), and configuration.

use std::sync::Arc;

use sqlx::PgPool;

use aqf_dispatch::{NotificationSink, RequestLifecycleManager, TracingSink};
use aqf_store::{MemoryStore, RequestStore};

/// Application configuration, read from the environment in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

/// Shared application state accessible to all route handlers.
///
/// Clone-friendly: the manager and sink are behind `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// The request lifecycle manager. The only component that mutates
    /// request status fields.
    pub manager: RequestLifecycleManager,
    /// Where handlers forward transition events after a successful
    /// write. Fire-and-forget.
    pub notifier: Arc<dyn NotificationSink>,
    /// Database pool when persistence is configured; `None` in
    /// in-memory mode. Used by the readiness probe.
    pub db_pool: Option<PgPool>,
    /// Application configuration.
    pub config: AppConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db_pool", &self.db_pool.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Build state over an arbitrary store.
    pub fn new(store: Arc<dyn RequestStore>, db_pool: Option<PgPool>, config: AppConfig) -> Self {
        Self {
            manager: RequestLifecycleManager::new(store),
            notifier: Arc::new(TracingSink),
            db_pool,
            config,
        }
    }

    /// In-memory state with defaults. The wiring used by tests and by
    /// deployments without `DATABASE_URL`.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), None, AppConfig::default())
    }

    /// Replace the notification sink.
    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }
}
