//! Inventory domain module.
//!
//! Stock levels are owned by the external inventory service. This crate holds
//! the stock record and the pure rules deciding whether a requested quantity
//! can be satisfied (no IO).

pub mod stock;

pub use stock::{Stock, StockError};
