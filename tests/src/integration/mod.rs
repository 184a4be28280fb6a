//! # Integration Tests
//!
//! Flows across `food-diary`, `shared-bus`, `diary-telemetry` and
//! `diary-node`, using only public APIs.

pub mod events;
pub mod scenario;
pub mod windows;
