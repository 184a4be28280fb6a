//! # Domain Invariants
//!
//! Constants of the record layout and rules that must always hold for the
//! ledger and the windowed queries.

use super::entities::FoodEntry;
use super::value_objects::WeeklyCounts;
use shared_types::{SECONDS_PER_DAY, SECONDS_PER_WEEK};

/// Largest calorie count a record can hold (24 bits).
pub const MAX_CALORIES: u32 = (1 << 24) - 1;

/// Largest timestamp a record can hold (32 bits).
pub const MAX_ENTRY_TIMESTAMP: u64 = u32::MAX as u64;

/// Threshold returned for users without an explicit override.
pub const DEFAULT_DAILY_CALORIE_THRESHOLD: u16 = 2000;

/// Length of each bucket in the two-week query.
pub const WEEK_SECS: u64 = SECONDS_PER_WEEK;

/// Length of one day for the N-day average.
pub const DAY_SECS: u64 = SECONDS_PER_DAY;

/// Invariant: the ledger is append-only.
///
/// `after` must start with exactly `before`, in order, and be exactly
/// `appended` entries longer.
pub fn invariant_append_only(before: &[FoodEntry], after: &[FoodEntry], appended: usize) -> bool {
    after.len() == before.len() + appended && after.starts_with(before)
}

/// Invariant: the two buckets never count more entries than exist.
pub fn invariant_window_partition(counts: &WeeklyCounts, total_entries: usize) -> bool {
    counts.total() <= total_entries as u64
}

/// Invariant: an average never exceeds the largest recordable calorie value.
pub fn invariant_average_bounded(average: u64) -> bool {
    average <= u64::from(MAX_CALORIES)
}
