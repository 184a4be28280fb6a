//! # Domain Errors
//!
//! Failure taxonomy of the diary. Every failure is reported to the caller
//! immediately and leaves state untouched.
//!
//! A user with no ledger or no threshold is NOT an error: reads return an
//! empty sequence or the default threshold.

use super::access::Operation;
use shared_types::Address;
use thiserror::Error;

/// Diary error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiaryError {
    /// A numeric input exceeds its declared bit-width.
    #[error("{field} out of range: {value} > {max}")]
    OutOfRange {
        /// Which input was too wide.
        field: &'static str,
        /// The rejected value.
        value: u64,
        /// Largest accepted value.
        max: u64,
    },

    /// The access controller denied the call.
    #[error("Forbidden: {caller} may not call {operation}")]
    Forbidden {
        /// The identity that made the call.
        caller: Address,
        /// The operation it attempted.
        operation: Operation,
    },
}

impl DiaryError {
    /// Short machine-readable kind, used as a metrics label.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "out_of_range",
            Self::Forbidden { .. } => "forbidden",
        }
    }
}
