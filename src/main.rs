//! HTTP server entry point for the salary engine.

use std::path::Path;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use salary_engine::api::{AppState, create_router};
use salary_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/ee";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir =
        std::env::var("SALARY_ENGINE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());

    let config = if Path::new(&config_dir).exists() {
        ConfigLoader::load(&config_dir)?
    } else {
        warn!(path = %config_dir, "Configuration directory not found, using built-in Estonian rates");
        ConfigLoader::estonian_defaults()
    };

    let bind_address = config.service().server.bind_address.clone();
    let state = AppState::from_config(config)?;

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(address = %bind_address, "Salary engine listening");

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
