//! Chartdesk command-line client
//!
//! Opens the market views against a Chartdesk backend and uploads data
//! files through the shared market store.

mod cli;
mod view;

use anyhow::Context;
use chartdesk_client::{ClientConfig, MarketClient, UploadFile};
use chartdesk_store::MarketStore;
use clap::Parser;
use cli::{Cli, Commands};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use view::MarketView;

/// Backend used when neither the flag nor the environment names one
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,chartdesk=debug")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Routes => {
            print!("{}", view::render_routes());
        }
        Commands::Show { path } => {
            let store = build_store(cli.base_url)?;
            let watcher = view::watch_state(&store);

            let view = MarketView::open(&path, Arc::clone(&store))?;
            view.load()
                .await
                .with_context(|| format!("Failed to load {}", view.route().path))?;
            print!("{}", view.render());

            watcher.abort();
        }
        Commands::Upload {
            path,
            file_type,
            file,
        } => {
            let store = build_store(cli.base_url)?;
            let watcher = view::watch_state(&store);

            let view = MarketView::open(&path, Arc::clone(&store))?;
            let upload = UploadFile::from_path(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let result = view
                .upload(&file_type, upload)
                .await
                .with_context(|| format!("Failed to upload {}", file.display()))?;

            println!("Upload result: {}", result);
            print!("{}", view.render());

            watcher.abort();
        }
    }

    Ok(())
}

/// Build the shared store from the environment and the command line
fn build_store(base_url: Option<String>) -> anyhow::Result<Arc<MarketStore>> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    if config.base_url.is_empty() {
        config.base_url = DEFAULT_BASE_URL.to_string();
    }

    info!("Using Chartdesk backend at {}", config.base_url);

    let client = MarketClient::new(config)?;
    Ok(Arc::new(MarketStore::new(Arc::new(client))))
}
