//! Main entry point for the fileboard server binary

use anyhow::Result;
use fileboard_core::{create_app, run_server, AppConfig, AppState};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    info!("Configuration loaded successfully");
    info!("Server will bind to: {}", config.bind_address());
    info!("Admin email set to: {}", config.auth.admin_email);
    info!("Upload directory: {}", config.files.upload_dir.display());

    config
        .create_directories()
        .map_err(|e| anyhow::anyhow!("Failed to create upload directory: {}", e))?;

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    let state = AppState::from_config(&config);
    info!("App: {} v{}", state.app_name, state.version);

    let app = create_app(state, &config);

    run_server(app, addr).await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let default_level = if cfg!(debug_assertions) { "debug" } else { "info" };

        format!(
            "{}={},tower_http=debug,axum=debug",
            env!("CARGO_CRATE_NAME").replace('-', "_"),
            default_level
        )
        .into()
    });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
