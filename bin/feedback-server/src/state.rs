//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use feedback_core::{DownloadService, SqliteStore};

use crate::config::Config;

/// State shared across all HTTP handlers.
#[derive(Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Host catalog lookups and health probes.
    pub store: SqliteStore,
    /// Download counters, sharing `store`'s pool.
    pub downloads: DownloadService<SqliteStore>,
}

impl AppState {
    pub fn new(config: Config, store: SqliteStore) -> Self {
        Self {
            config: Arc::new(config),
            downloads: DownloadService::with_system_clock(store.clone()),
            store,
        }
    }
}
