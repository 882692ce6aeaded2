//! Blood bank API server

use anyhow::anyhow;
use bloodbank_api::{
    AppConfig, AppState, build_router, init_default_logging, init_development_logging,
};
use bloodbank_services::StoreFactory;
use clap::Parser;
use tracing::{info, warn};

mod api;

use api::{Args, shutdown_signal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Missing .env is fine, variables may come from the environment
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let logging = if args.dev { init_development_logging() } else { init_default_logging() };
    logging.map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    info!("Starting blood bank API server");
    if !dotenv_loaded {
        info!("No .env file loaded");
    }

    let config = AppConfig::load(args.config.as_deref())
        .map_err(|e| anyhow!("Failed to load configuration: {}", e.message()))?
        .with_overrides(args.port, args.store);
    let addr = config.bind_address().map_err(|e| anyhow!(e.message()))?;

    let stores = StoreFactory::connect(&config.store_config())
        .await
        .map_err(|e| anyhow!("Failed to connect document store: {:#}", e))?;

    let static_dir = config.server.static_dir.as_path();
    let static_dir = if static_dir.is_dir() {
        Some(static_dir)
    } else {
        warn!(path = %static_dir.display(), "Static directory not found, serving API only");
        None
    };

    let app = build_router(AppState::new(stores), static_dir);

    info!("Blood bank API listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("Blood bank API shutdown complete");
    Ok(())
}
