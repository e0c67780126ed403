//! climate-api - a read-only HTTP API over a climate database
//!
//! This is the main entry point for the climate-api application.

use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

use climate_api::{
    init_tracing, log_error, log_store_stats, router, AppState, ClimateError, ClimateStore, Config,
    Result,
};

fn main() -> Result<()> {
    // Load and validate configuration before anything else
    let (config, database_path) = Config::load()?;
    config.validate()?;

    init_tracing(&config.log_level);
    info!("Starting climate-api v{}", env!("CARGO_PKG_VERSION"));

    let mut runtime = tokio::runtime::Builder::new_multi_thread();
    if let Some(workers) = config.server.workers {
        runtime.worker_threads(workers);
    }
    let runtime = runtime.enable_all().build()?;

    runtime.block_on(serve(config, database_path)).map_err(|e| {
        log_error(&e, "server");
        e
    })
}

async fn serve(config: Config, database_path: std::path::PathBuf) -> Result<()> {
    info!("Opening database: {:?}", database_path);

    let store = ClimateStore::open(&database_path, &config.store).await?;
    let summary = store.summary().await?;
    log_store_stats(&database_path.display().to_string(), &summary);

    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| ClimateError::Config {
                message: format!("Invalid host address: {}", e),
            })?,
        config.server.port,
    ));

    let state = AppState::new_shared(config, store.clone());
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ClimateError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ClimateError::Server {
            message: format!("Server error: {}", e),
        })?;

    store.close().await;
    info!("Server has been gracefully shut down");
    Ok(())
}

/// Wait for a shutdown signal
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
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
