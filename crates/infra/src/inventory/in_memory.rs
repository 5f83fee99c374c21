use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use rocketcart_core::ProductId;
use rocketcart_inventory::Stock;
use rocketcart_products::Product;

use super::r#trait::{InventoryError, InventoryService};

/// In-memory inventory service.
///
/// Intended for tests/dev. Stock and catalog entries can be changed while the
/// cart is running; `set_offline(true)` makes every request fail like a dropped
/// connection, and `with_latency` forces each request to suspend so concurrent
/// operations get a chance to interleave.
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    stock: RwLock<HashMap<ProductId, u32>>,
    products: RwLock<HashMap<ProductId, Product>>,
    offline: AtomicBool,
    latency: Option<Duration>,
    stock_requests: AtomicUsize,
    product_requests: AtomicUsize,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Register a catalog product with the given stock level.
    pub fn with_product(self, product: Product, stock: u32) -> Self {
        self.put_product(product, stock);
        self
    }

    pub fn put_product(&self, product: Product, stock: u32) {
        let id = product.id;
        if let Ok(mut products) = self.products.write() {
            products.insert(id, product);
        }
        self.set_stock(id, stock);
    }

    /// Set stock for an id whether or not the catalog knows it.
    pub fn set_stock(&self, product_id: ProductId, amount: u32) {
        if let Ok(mut stock) = self.stock.write() {
            stock.insert(product_id, amount);
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn stock_requests(&self) -> usize {
        self.stock_requests.load(Ordering::SeqCst)
    }

    pub fn product_requests(&self) -> usize {
        self.product_requests.load(Ordering::SeqCst)
    }

    async fn round_trip(&self) -> Result<(), InventoryError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(InventoryError::Network("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl InventoryService for InMemoryInventory {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, InventoryError> {
        self.stock_requests.fetch_add(1, Ordering::SeqCst);
        self.round_trip().await?;

        let stock = self
            .stock
            .read()
            .map_err(|_| InventoryError::Network("inventory lock poisoned".to_string()))?;
        stock
            .get(&product_id)
            .map(|amount| Stock::new(product_id, *amount))
            .ok_or(InventoryError::NotFound(product_id))
    }

    async fn product(&self, product_id: ProductId) -> Result<Product, InventoryError> {
        self.product_requests.fetch_add(1, Ordering::SeqCst);
        self.round_trip().await?;

        let products = self
            .products
            .read()
            .map_err(|_| InventoryError::Network("inventory lock poisoned".to_string()))?;
        products
            .get(&product_id)
            .cloned()
            .ok_or(InventoryError::NotFound(product_id))
    }
}
