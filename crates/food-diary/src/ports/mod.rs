//! Ports module for the Food Diary
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::FoodDiaryApi;
pub use outbound::{EntryStore, ThresholdStore, TimeSource};
