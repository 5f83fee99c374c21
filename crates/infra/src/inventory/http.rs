//! HTTP client for the inventory service.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use rocketcart_core::ProductId;
use rocketcart_inventory::Stock;
use rocketcart_products::Product;

use super::r#trait::{InventoryError, InventoryService};

/// `InventoryService` over plain JSON HTTP.
///
/// No timeout is configured: an unresolved request delays the cart operation
/// until the transport itself gives up.
#[derive(Debug, Clone)]
pub struct HttpInventoryClient {
    client: reqwest::Client,
    api_url: String,
}

impl HttpInventoryClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, resource: &str, product_id: ProductId) -> String {
        format!("{}/{}/{}", self.api_url, resource, product_id)
    }

    async fn get_json<T>(&self, resource: &str, product_id: ProductId) -> Result<T, InventoryError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(resource, product_id);
        tracing::debug!(%url, "fetching from inventory service");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| InventoryError::Network(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(InventoryError::NotFound(product_id));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(InventoryError::Api(status.as_u16(), body));
        }

        resp.json::<T>()
            .await
            .map_err(|e| InventoryError::Parse(e.to_string()))
    }
}

#[async_trait]
impl InventoryService for HttpInventoryClient {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, InventoryError> {
        self.get_json("stock", product_id).await
    }

    async fn product(&self, product_id: ProductId) -> Result<Product, InventoryError> {
        self.get_json("products", product_id).await
    }
}
