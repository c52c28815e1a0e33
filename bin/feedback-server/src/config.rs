//! Server configuration, loaded from environment variables at startup.

use std::time::Duration;

use feedback_core::StoreOptions;

/// Runtime configuration for feedback-server.
///
/// Every field has a default so the server works without any environment
/// variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:3000"`).
    pub bind_address: String,

    /// SQLite database URL shared with the host catalog
    /// (default: `"sqlite://feedback.db?mode=rwc"`).
    pub database_url: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,sqlx=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Pooled connections shared by all handlers.
    pub db_max_connections: u32,

    /// How long a write waits on a competing writer, in milliseconds.
    pub db_busy_timeout_ms: u64,

    /// Serve the OpenAPI document at `/api-docs/openapi.json`.
    pub enable_docs: bool,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            bind_address: lookup("FEEDBACK_BIND").unwrap_or_else(|| "0.0.0.0:3000".to_owned()),
            database_url: lookup("FEEDBACK_DATABASE_URL")
                .unwrap_or_else(|| "sqlite://feedback.db?mode=rwc".to_owned()),
            log_level: lookup("FEEDBACK_LOG").unwrap_or_else(|| "info".to_owned()),
            log_json: lookup("FEEDBACK_LOG_JSON").map(|v| parse_bool(&v)).unwrap_or(false),
            db_max_connections: parse_or(lookup("FEEDBACK_DB_MAX_CONNECTIONS"), 8),
            db_busy_timeout_ms: parse_or(lookup("FEEDBACK_DB_BUSY_TIMEOUT_MS"), 5_000),
            enable_docs: lookup("FEEDBACK_ENABLE_DOCS").map(|v| parse_bool(&v)).unwrap_or(true),
        }
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            url: self.database_url.clone(),
            max_connections: self.db_max_connections,
            busy_timeout: Duration::from_millis(self.db_busy_timeout_ms),
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn parse_bool(raw: &str) -> bool {
    raw == "1" || raw.eq_ignore_ascii_case("true")
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.parse().ok()).unwrap_or(default)
}
