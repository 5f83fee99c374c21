//! Durable key/value storage for the cart.
//!
//! The cart is stored as one JSON string under one key, overwritten wholesale
//! on every commit and read once at startup.

pub mod in_memory;
pub mod sqlite;
pub mod r#trait;

pub use in_memory::InMemoryStorage;
pub use sqlite::SqliteStorage;
pub use r#trait::{CartStorage, StorageError};
