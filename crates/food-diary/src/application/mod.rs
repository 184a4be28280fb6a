//! Application layer: service orchestration over the ports.

pub mod service;

pub use service::{FoodDiaryService, ServiceStats};
