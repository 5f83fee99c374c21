//! Events and snapshot distribution.
//!
//! - [`Event`]: facts emitted by aggregate transitions.
//! - [`EventBus`]: fan-out of committed values (cart snapshots, outcome notices)
//!   to any number of subscribers.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
