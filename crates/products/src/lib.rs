//! Product catalog records.
//!
//! The catalog is owned by the inventory service; this crate only describes
//! the shape the cart receives and keeps.

pub mod product;

pub use product::Product;
pub use rocketcart_core::ProductId;
