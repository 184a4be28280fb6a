//! Windowed Aggregation
//!
//! Pure functions over a ledger snapshot and a reference time `now`.
//! Every window is half-open: `[start, end)`. Window starts saturate at 0
//! so early `now` values never underflow.

use crate::domain::entities::FoodEntry;
use crate::domain::invariants::{DAY_SECS, WEEK_SECS};
use crate::domain::value_objects::WeeklyCounts;
use shared_types::UnixTimestamp;

/// A half-open time interval `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    /// Inclusive lower bound.
    pub start: UnixTimestamp,
    /// Exclusive upper bound.
    pub end: UnixTimestamp,
}

impl Window {
    /// The window of `length` seconds ending at `end`.
    #[must_use]
    pub const fn trailing(end: UnixTimestamp, length: u64) -> Self {
        Self {
            start: end.saturating_sub(length),
            end,
        }
    }

    /// The window of `length` seconds ending where `self` starts.
    #[must_use]
    pub const fn preceding(&self, length: u64) -> Self {
        Self::trailing(self.start, length)
    }

    /// True if `t` lies in `[start, end)`.
    #[must_use]
    pub const fn contains(&self, t: UnixTimestamp) -> bool {
        self.start <= t && t < self.end
    }
}

/// Count entries in the last week and the week before.
///
/// - last week: `[now - 7d, now)`
/// - week before: `[now - 14d, now - 7d)`
///
/// Entries older than 14 days or at/after `now` are not counted.
pub fn entries_in_last_two_weeks(entries: &[FoodEntry], now: UnixTimestamp) -> WeeklyCounts {
    let last_week = Window::trailing(now, WEEK_SECS);
    let week_before = last_week.preceding(WEEK_SECS);

    entries
        .iter()
        .map(|entry| entry.timestamp().as_secs())
        .fold(WeeklyCounts::default(), |mut counts, t| {
            if last_week.contains(t) {
                counts.last_week += 1;
            } else if week_before.contains(t) {
                counts.week_before += 1;
            }
            counts
        })
}

/// Integer mean of calories over `[now - days_ago * 1d, now)`.
///
/// Truncates toward zero. Returns 0 when no entry falls in the window,
/// including `days_ago == 0`.
pub fn average_calories(entries: &[FoodEntry], days_ago: u64, now: UnixTimestamp) -> u64 {
    let window = Window::trailing(now, days_ago.saturating_mul(DAY_SECS));

    let (sum, count) = entries
        .iter()
        .filter(|entry| window.contains(entry.timestamp().as_secs()))
        .fold((0u128, 0u128), |(sum, count), entry| {
            (sum + u128::from(entry.calories().get()), count + 1)
        });

    if count == 0 {
        return 0;
    }

    // The mean of 24-bit values always fits
    (sum / count) as u64
}
