//! Infrastructure layer: the cart manager and the adapters it runs on.

pub mod config;
pub mod inventory;
pub mod manager;
pub mod reporter;
pub mod storage;


pub use config::CartConfig;
pub use manager::CartManager;
pub use reporter::{BusReporter, LogReporter, OutcomeReporter};
