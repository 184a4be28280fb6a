//! # Domain Module
//!
//! Core domain types for the food diary: ledger records, the access policy,
//! errors and the invariants the ledger must uphold.

pub mod access;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use access::*;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use value_objects::*;
