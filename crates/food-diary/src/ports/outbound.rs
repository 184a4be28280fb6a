//! Outbound Ports (Driven Ports / SPI)
//!
//! Storage and time dependencies of the diary service. Store operations are
//! infallible: a missing ledger reads as empty and a missing threshold reads
//! as the default.

use crate::domain::entities::FoodEntry;
use shared_types::{Address, UnixTimestamp};

/// Per-user append-only ledger storage.
///
/// Implementations must serialize appends and reads per user, so a reader
/// sees a ledger either fully before or fully after any append.
pub trait EntryStore: Send + Sync {
    /// Append `entry` to the end of `user`'s ledger, creating it if absent.
    fn append(&self, user: &Address, entry: FoodEntry);

    /// The full ledger in append order; empty if the user has none.
    fn list(&self, user: &Address) -> Vec<FoodEntry>;

    /// Number of entries in `user`'s ledger.
    fn len(&self, user: &Address) -> usize;

    /// True if `user` has no entries.
    fn is_empty(&self, user: &Address) -> bool {
        self.len(user) == 0
    }
}

/// Per-user daily calorie threshold storage.
pub trait ThresholdStore: Send + Sync {
    /// The stored threshold, or the default if none was ever set.
    ///
    /// Never creates a record.
    fn get(&self, user: &Address) -> u64;

    /// Create or overwrite `user`'s threshold.
    fn set(&self, user: &Address, value: u64);

    /// True if an explicit threshold is stored for `user`.
    fn is_set(&self, user: &Address) -> bool;
}

/// Time source for window queries.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Current time in seconds since the Unix epoch.
    fn now(&self) -> UnixTimestamp;
}
