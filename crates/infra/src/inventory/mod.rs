//! Inventory service boundary.
//!
//! The inventory service owns stock levels and catalog records. The cart only
//! reads from it, one product at a time.

pub mod http;
pub mod in_memory;
pub mod r#trait;

pub use http::HttpInventoryClient;
pub use in_memory::InMemoryInventory;
pub use r#trait::{InventoryError, InventoryService};
