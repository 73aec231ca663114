//! figrec daemon - recommends visualization modules for free-text queries.
//!
//! Loads the module catalog once at startup, then serves recommendation
//! requests by delegating semantic matching to a chat-completion endpoint.

use anyhow::{Context, Result};
use figrecd::config::DaemonConfig;
use figrecd::server::{self, AppState};
use figrec_common::{Catalog, HttpLlmClient, Recommender};
use std::sync::Arc;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // .env file is optional; real environment wins
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("figrecd v{} starting", env!("CARGO_PKG_VERSION"));

    let config = DaemonConfig::from_env()?;

    let catalog = Arc::new(
        Catalog::load(&config.catalog_path)
            .with_context(|| format!("failed to load catalog from {}", config.catalog_path))?,
    );
    info!(
        "Catalog ready: {} eligible modules (model: {})",
        catalog.len(),
        config.llm.model
    );

    let client = HttpLlmClient::new(config.llm.clone())
        .context("failed to build LLM client")?;
    let recommender = Recommender::new(catalog.clone(), Arc::new(client));

    let state = AppState::new(catalog, recommender);
    server::run(state, config.port).await
}
