mod app;
mod catalog;
mod config;
mod loader;
mod models;
mod query;
mod tui;

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::AppConfig::from_args(config::Args::parse());
    config.ensure_filesystem()?;
    init_tracing(&config)?;

    info!(dataset = %config.dataset().describe(), sort = %config.initial_sort(), "starting");

    let (msg_tx, msg_rx) = tokio::sync::mpsc::unbounded_channel();

    let catalog = catalog::CatalogStore::new();
    let controller = tui::AppController::new(config, catalog, msg_tx);

    let app = tui::App::new(controller, msg_rx);
    tui::run(app).await
}

// The terminal belongs to the UI, so diagnostics go to a file.
fn init_tracing(config: &config::AppConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())
        .with_context(|| format!("Failed to open log file: {}", config.log_path().display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
