use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use labelbridge_core::{
    load_config, validate_config, ArtworkSource, GeometryExtractor, HttpArtworkSource, LogFormat,
    LopdfGeometryExtractor,
};
use labelbridge_server::{api::create_router, state::AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // Logging may not be up yet if the config failed to load
        eprintln!("Fatal error: {:#}", e);
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn run() -> Result<()> {
    // Determine config path
    let config_path = std::env::var("LABELBRIDGE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    validate_config(&config).context("Configuration validation failed")?;

    init_logging(config.logging.format);
    info!("Configuration loaded from {:?}", config_path);
    info!("Download dir: {:?}", config.staging.download_dir);
    info!("Outbox dir: {:?}", config.staging.outbox_dir);
    match &config.staging.secondary_dir {
        Some(dir) => info!("Secondary copies go to {:?}", dir),
        None => info!("No secondary dir configured"),
    }

    let source: Arc<dyn ArtworkSource> = Arc::new(
        HttpArtworkSource::from_config(&config.order_source)
            .context("Failed to create artwork HTTP client")?,
    );
    let geometry: Arc<dyn GeometryExtractor> = Arc::new(LopdfGeometryExtractor::new());

    let addr = SocketAddr::new(config.server.host, config.server.port);
    let state = AppState::from_config(config, source, geometry)
        .context("Invalid normalizer configuration")?;

    state
        .processor()
        .stager()
        .ensure_dirs()
        .await
        .context("Failed to create staging directories")?;

    let app = create_router(Arc::new(state));

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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

    info!("Shutdown signal received");
}
