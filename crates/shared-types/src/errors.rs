//! # Error Types
//!
//! Defines error types shared across crates.

use thiserror::Error;

/// Errors produced when parsing an `Address` from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressParseError {
    /// Wrong number of hex digits.
    #[error("Invalid address length: expected {expected} hex digits, got {got}")]
    InvalidLength { expected: usize, got: usize },

    /// Non-hex characters in the input.
    #[error("Invalid address hex: {0}")]
    InvalidHex(String),
}
