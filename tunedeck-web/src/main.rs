//! Tunedeck web service - Main entry point
//!
//! Playlist/favorites manager for music videos sourced from an external
//! video-search provider, authenticated against an external identity
//! provider.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tunedeck_common::config::Config;
use tunedeck_common::db::init_database;
use tunedeck_web::search::SearchClient;
use tunedeck_web::token::TokenVerifier;
use tunedeck_web::{build_router, AppState};

/// Command-line arguments for tunedeck-web
#[derive(Parser, Debug)]
#[command(name = "tunedeck-web")]
#[command(about = "Playlist manager service for Tunedeck")]
#[command(version)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, env = "TUNEDECK_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured bind address
    #[arg(short, long, env = "TUNEDECK_BIND_ADDR")]
    bind_addr: Option<String>,

    /// Override the configured database path
    #[arg(short, long, env = "TUNEDECK_DATABASE_PATH")]
    database_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tunedeck_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting Tunedeck web service v{}", env!("CARGO_PKG_VERSION"));

    let mut config =
        Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(bind_addr) = args.bind_addr {
        config.bind_addr = bind_addr;
    }
    if let Some(database_path) = args.database_path {
        config.database_path = database_path;
    }
    info!("Database path: {}", config.database_path.display());

    let pool = init_database(&config.database_path)
        .await
        .context("Failed to initialize database")?;

    if config.search.api_key.is_empty() {
        warn!("Search provider API key is empty; search requests will fail upstream");
    }
    let search = SearchClient::new(&config.search).context("Failed to create search client")?;

    let verifier = TokenVerifier::from_config(&config.auth)
        .await
        .context("Failed to configure credential verification")?;

    let state = AppState::new(pool, search, verifier);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;
    info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        }
    }
}
