//! # xroute-api — Binary Entry Point
//!
//! Starts the Axum HTTP server. Binds to `PORT` (default 8080) and shuts
//! down gracefully on SIGINT/SIGTERM, cancelling in-flight request contexts.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use xroute_api::state::AppConfig;
use xroute_onchain::{ExecutorConfig, HttpOnchainExecutor, OnchainExecutor};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Invalid configuration: {e}");
        e
    })?;
    let port = config.port;

    // Initialize database pool (optional; absent means in-memory only).
    let db_pool = xroute_api::db::init_pool().await.map_err(|e| {
        tracing::error!("Database initialization failed: {e}");
        e
    })?;

    let executor: Option<Arc<dyn OnchainExecutor>> = match ExecutorConfig::from_env()? {
        Some(executor_config) => {
            tracing::info!(config = ?executor_config, "execution layer configured");
            Some(Arc::new(HttpOnchainExecutor::new(executor_config)?))
        }
        None => None,
    };

    let state = xroute_api::bootstrap::bootstrap(config, db_pool, executor).map_err(|e| {
        tracing::error!("Bootstrap failed: {e}");
        e
    })?;
    let shutdown = state.shutdown.clone();

    let app = xroute_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("xroute API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    tracing::info!("xroute API stopped");
    Ok(())
}

async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
    shutdown.cancel();
}
