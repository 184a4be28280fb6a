//! # Shared Types Crate
//!
//! Identity and time primitives shared across the Food Diary workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Address` is the only identity type. The
//!   ledger, the access controller and the event bus all key on it.
//! - **Caller-Supplied Time**: timestamps are plain seconds since the Unix
//!   epoch. Nothing in this crate reads the system clock.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
