//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-memory implementations of the outbound ports.

mod entry_store;
mod threshold_store;
mod time_source;

pub use entry_store::InMemoryEntryStore;
pub use threshold_store::InMemoryThresholdStore;
pub use time_source::{FixedTimeSource, SystemTimeSource};
