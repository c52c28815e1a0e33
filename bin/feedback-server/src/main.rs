//! feedback-server – entry point.
//!
//! Startup order:
//! 1. Parse the command line and configuration from environment variables.
//! 2. Initialise structured tracing (JSON in production, pretty in dev).
//! 3. Open the SQLite database shared with the host catalog.
//! 4. `init`: provision the `download_summary` schema and exit.
//!    `serve`: build the Axum router and serve with graceful shutdown.

mod config;
mod error;
mod middleware;
mod routes;
mod schemas;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use feedback_core::SqliteStore;
use tracing::{info, warn};

use crate::config::Config;
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "feedback-server", version, about = "Download counters for dataset resources")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Create the download_summary table, then exit.
    Init,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Command line & configuration ────────────────────────────────────────
    let cli = Cli::parse();
    let cfg = Config::from_env();

    // ── 2. Tracing ─────────────────────────────────────────────────────────────
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => match cfg.log_level.parse::<tracing_subscriber::EnvFilter>() {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "WARN: FEEDBACK_LOG='{}' is not a valid tracing filter ({}); \
                     falling back to 'info'",
                    cfg.log_level, e
                );
                tracing_subscriber::EnvFilter::new("info")
            }
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true);

    if cfg.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!(version = env!("CARGO_PKG_VERSION"), "feedback-server starting");

    // ── 3. Database ────────────────────────────────────────────────────────────
    let store = SqliteStore::connect_with(&cfg.store_options()).await?;
    info!(database_url = %cfg.database_url, "database connected");

    match cli.command.unwrap_or(Command::Serve) {
        Command::Init => {
            store.init_schema().await?;
            info!("initialisation finished");
            Ok(())
        }
        Command::Serve => serve(cfg, store).await,
    }
}

async fn serve(cfg: Config, store: SqliteStore) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(cfg.clone(), store));
    let app = routes::build(state);
    let addr: SocketAddr = cfg.bind_address.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("feedback-server stopped");
    Ok(())
}

/// Returns a future that resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c    => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}
