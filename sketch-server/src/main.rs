use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sketch_core::WordCatalog;
use sketch_server::{
    config::Config, coordinator::GameCoordinator, create_routes,
    websocket::{ConnectionManager, rate_limiter::RateLimiter},
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sketch_server=info,sketch_core=info,warp=info")),
        )
        .init();

    info!("Starting sketch server...");

    let config = Config::new();

    let catalog = match &config.words_file {
        Some(path) => {
            info!("Loading words from file: {}", path);
            match WordCatalog::from_file(path) {
                Ok(catalog) => catalog,
                Err(e) => {
                    error!("Failed to load words from '{}': {:#}", path, e);
                    error!("Unset WORDS_FILE to use the built-in word lists.");
                    std::process::exit(1);
                }
            }
        }
        None => WordCatalog::builtin(),
    };
    info!(
        "Word catalog ready: {} words in {} categories",
        catalog.word_count(),
        catalog.category_names().len()
    );

    let connections = Arc::new(ConnectionManager::new());
    let coordinator = GameCoordinator::new(config.clone(), connections, Arc::new(catalog));
    let rate_limiter = RateLimiter::new(config.rate_limit_burst, config.rate_limit_per_second);
    let routes = create_routes(coordinator, rate_limiter);

    let ip = match config.host.parse::<std::net::IpAddr>() {
        Ok(ip) => ip,
        Err(e) => {
            error!("Invalid HOST '{}': {}", config.host, e);
            std::process::exit(1);
        }
    };

    info!("Server starting on {}:{}", config.host, config.port);

    let (addr, server) =
        warp::serve(routes).bind_with_graceful_shutdown((ip, config.port), shutdown_signal());

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}

/// Resolves on SIGINT or SIGTERM (Ctrl+C elsewhere).
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let (mut sigint, mut sigterm) =
            match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
                (Ok(sigint), Ok(sigterm)) => (sigint, sigterm),
                (Err(e), _) | (_, Err(e)) => {
                    error!("Failed to install signal handlers: {}", e);
                    std::future::pending::<()>().await;
                    return;
                }
            };

        tokio::select! {
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down gracefully...");
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down gracefully...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl+c: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down gracefully...");
    }
}
