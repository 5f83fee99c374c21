use thiserror::Error;

use rocketcart_core::{DomainError, ProductId};
use rocketcart_inventory::StockError;

/// The three cart-mutating operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

impl CartOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            CartOperation::Add => "add",
            CartOperation::Remove => "remove",
            CartOperation::UpdateAmount => "update_amount",
        }
    }
}

impl core::fmt::Display for CartOperation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a cart operation was rejected. A rejected operation never changes the cart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Inventory has zero units of the product.
    #[error("product {0} is out of stock")]
    OutOfStock(ProductId),

    /// The resulting quantity would exceed what inventory holds.
    #[error("product {product_id}: requested {requested}, only {available} in stock")]
    InsufficientStock {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },

    /// The product has no line item in the cart.
    #[error("product {0} is not in the cart")]
    NotFound(ProductId),

    /// Anything unexpected: transport failure, malformed response, storage failure.
    #[error("operation failed: {0}")]
    OperationFailed(String),
}

impl CartError {
    pub fn operation_failed(msg: impl Into<String>) -> Self {
        Self::OperationFailed(msg.into())
    }
}

impl From<StockError> for CartError {
    fn from(value: StockError) -> Self {
        match value {
            StockError::OutOfStock { product_id } => CartError::OutOfStock(product_id),
            StockError::Insufficient {
                product_id,
                requested,
                available,
            } => CartError::InsufficientStock {
                product_id,
                requested,
                available,
            },
        }
    }
}

impl From<DomainError> for CartError {
    fn from(value: DomainError) -> Self {
        CartError::OperationFailed(value.to_string())
    }
}
