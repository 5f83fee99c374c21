use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use rocketcart_core::ProductId;
use rocketcart_inventory::Stock;
use rocketcart_products::Product;

/// Failure talking to the inventory service.
///
/// None of these are user-facing on their own; the cart manager folds every
/// variant into a generic operation failure.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("network error: {0}")]
    Network(String),

    #[error("inventory API error ({0}): {1}")]
    Api(u16, String),

    #[error("malformed inventory response: {0}")]
    Parse(String),

    #[error("product {0} is unknown to the inventory service")]
    NotFound(ProductId),
}

/// Read access to the external inventory service.
///
/// - `stock` maps to `GET stock/{id}`
/// - `product` maps to `GET products/{id}`
#[async_trait]
pub trait InventoryService: Send + Sync {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, InventoryError>;

    async fn product(&self, product_id: ProductId) -> Result<Product, InventoryError>;
}

#[async_trait]
impl<T> InventoryService for Arc<T>
where
    T: InventoryService + ?Sized,
{
    async fn stock(&self, product_id: ProductId) -> Result<Stock, InventoryError> {
        (**self).stock(product_id).await
    }

    async fn product(&self, product_id: ProductId) -> Result<Product, InventoryError> {
        (**self).product(product_id).await
    }
}
