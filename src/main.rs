//! Bounded Cache - interactive shell
//!
//! Drives a string cache from stdin, one command per line, and prints one JSON
//! reply per line on stdout. Logs go to stderr.

use anyhow::Context;
use tokio::io::{self, BufReader};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bounded_cache::repl::{self, Session};
use bounded_cache::{Config, SharedCache};

/// Main entry point for the cache shell.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the shared cache
/// 4. Run the shell until EOF, QUIT, or a shutdown signal
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bounded_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting bounded cache shell");

    let config = Config::from_env().context("failed to load cache configuration")?;
    info!(
        "Configuration loaded: ttl={}ms, max_size={}",
        config.ttl_ms, config.max_size
    );
    if config.max_size == 0 {
        warn!("CACHE_MAX_SIZE is 0, the cache will not retain any entries");
    }

    let session = Session::new(SharedCache::new(config.cache_options()));
    let reader = BufReader::new(io::stdin());
    let writer = io::stdout();

    tokio::select! {
        result = repl::run(reader, writer, &session) => {
            let replies = result.context("shell I/O failed")?;
            info!("Input closed after {} replies", replies);
        }
        _ = shutdown_signal() => {}
    }

    let stats = session.cache().stats();
    info!(
        "Shutdown complete: hits={}, misses={}, evictions={}, expirations={}",
        stats.hits, stats.misses, stats.evictions, stats.expirations
    );
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
