mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use rocketcart_cart::{Cart, Notice};
use rocketcart_events::{EventBus, InMemoryEventBus};
use rocketcart_infra::inventory::HttpInventoryClient;
use rocketcart_infra::storage::SqliteStorage;
use rocketcart_infra::{BusReporter, CartConfig, CartManager};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    rocketcart_observability::init(cli.log_format);

    let mut config = CartConfig::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(db_path) = cli.db_path {
        config.database_path = db_path;
    }

    let storage = SqliteStorage::open(&config.database_path)
        .await
        .with_context(|| format!("failed to open cart storage at {:?}", config.database_path))?;
    let inventory = HttpInventoryClient::new(config.api_url.as_str());

    let notices: Arc<InMemoryEventBus<Notice>> = Arc::new(InMemoryEventBus::new());
    let rejected = notices.subscribe();
    let snapshots: InMemoryEventBus<Arc<Cart>> = InMemoryEventBus::new();

    let manager = CartManager::load(
        inventory,
        storage,
        BusReporter::new(notices),
        snapshots,
        config.storage_key(),
    )
    .await
    .context("failed to load cart")?;

    info!(api_url = %config.api_url, key = manager.storage_key(), "cart ready");

    match cli.command {
        Commands::Show => {}
        Commands::Add { product_id } => manager.add_product(product_id).await,
        Commands::Remove { product_id } => manager.remove_product(product_id).await,
        Commands::Update { product_id, amount } => {
            manager.update_product_amount(product_id, amount).await
        }
    }

    print!("{}", cli::render(&manager.cart()));

    let failures = rejected.drain();
    for notice in &failures {
        eprintln!("{notice}");
    }
    if !failures.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
