use serde::{Deserialize, Serialize};
use thiserror::Error;

use rocketcart_core::ProductId;

/// Stock record as served by `GET stock/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    /// Units available in inventory.
    pub amount: u32,
}

/// Why a stock check rejected a request.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StockError {
    #[error("product {product_id} has no stock")]
    OutOfStock { product_id: ProductId },

    #[error("product {product_id}: requested {requested}, available {available}")]
    Insufficient {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },
}

impl Stock {
    pub fn new(id: ProductId, amount: u32) -> Self {
        Self { id, amount }
    }

    pub fn is_available(&self) -> bool {
        self.amount >= 1
    }

    /// Reject when nothing is left.
    pub fn ensure_available(&self) -> Result<(), StockError> {
        if !self.is_available() {
            return Err(StockError::OutOfStock { product_id: self.id });
        }
        Ok(())
    }

    /// Reject when `requested` units cannot be covered.
    ///
    /// An empty stock is reported as out-of-stock regardless of `requested`.
    pub fn ensure_satisfies(&self, requested: u64) -> Result<(), StockError> {
        self.ensure_available()?;
        if requested > u64::from(self.amount) {
            return Err(StockError::Insufficient {
                product_id: self.id,
                requested,
                available: self.amount,
            });
        }
        Ok(())
    }
}
