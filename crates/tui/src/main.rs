mod app;
mod client;
mod clipboard;
mod config;
mod error;
mod local_store;
mod prompt;
mod routes;
mod snapshot;
mod ui;

use std::sync::{Arc, Mutex};

use deck_engine::collab::WalletStore;

use crate::{
    config::{AppConfig, Backend},
    error::Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_logging(&config)?;

    let (store, source) = open_store(&config).await?;
    let mut app = app::App::new(&config, store, source);
    app.run().await?;
    Ok(())
}

/// Logs go to a file: the terminal belongs to the UI.
fn init_logging(config: &AppConfig) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "walletdeck_tui={level},deck_engine={level}",
            level = config.log_level
        ))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn open_store(config: &AppConfig) -> Result<(Arc<dyn WalletStore>, String)> {
    match config.backend {
        Backend::Http => {
            let client = client::Client::new(&config.base_url)?;
            let store = client::HttpStore::connect(client, config.electrum_disabled).await?;
            tracing::info!(base_url = config.base_url.as_str(), "connected to wallet server");
            let store: Arc<dyn WalletStore> = Arc::new(store);
            Ok((store, config.base_url.clone()))
        }
        Backend::File => {
            let store = local_store::FileStore::open(&config.wallets_file, config.electrum_disabled)?;
            let source = store.path().display().to_string();
            tracing::info!(path = source.as_str(), "opened wallets file");
            let store: Arc<dyn WalletStore> = Arc::new(store);
            Ok((store, source))
        }
    }
}
