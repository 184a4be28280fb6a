//! # Domain Value Objects
//!
//! Fixed-width ledger fields. Each type can only hold values that fit the
//! record layout, so a `FoodEntry` is valid by construction.

use super::errors::DiaryError;
use super::invariants::{MAX_CALORIES, MAX_ENTRY_TIMESTAMP};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

// =============================================================================
// FOOD NAME (32 bytes)
// =============================================================================

/// A fixed-width food label: up to 32 bytes of UTF-8, zero-padded.
///
/// Longer text is truncated at the last character boundary that fits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FoodName([u8; 32]);

impl FoodName {
    /// Width of the label in bytes.
    pub const LEN: usize = 32;

    /// Encode a label, zero-padding or truncating to 32 bytes.
    #[must_use]
    pub fn new(label: &str) -> Self {
        let mut end = label.len().min(Self::LEN);
        while !label.is_char_boundary(end) {
            end -= 1;
        }

        let mut bytes = [0u8; 32];
        bytes[..end].copy_from_slice(&label.as_bytes()[..end]);
        Self(bytes)
    }

    /// Wrap raw bytes as recorded (e.g. from an event payload).
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The label with trailing zero padding removed.
    #[must_use]
    pub fn as_str(&self) -> Cow<'_, str> {
        let len = self
            .0
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |last| last + 1);
        String::from_utf8_lossy(&self.0[..len])
    }

    /// True if every byte is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

impl From<&str> for FoodName {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<FoodName> for [u8; 32] {
    fn from(name: FoodName) -> Self {
        name.0
    }
}

impl fmt::Display for FoodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

impl fmt::Debug for FoodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FoodName({:?})", self.as_str())
    }
}

// =============================================================================
// CALORIES (24 bits)
// =============================================================================

/// Calorie count in `[0, 2^24 - 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Calories(u32);

impl Calories {
    /// Largest representable value.
    pub const MAX: Self = Self(MAX_CALORIES);

    /// Validate a caller-supplied value.
    pub fn try_new(value: u64) -> Result<Self, DiaryError> {
        if value > u64::from(MAX_CALORIES) {
            return Err(DiaryError::OutOfRange {
                field: "calories",
                value,
                max: u64::from(MAX_CALORIES),
            });
        }
        // Fits: MAX_CALORIES < u32::MAX
        Ok(Self(value as u32))
    }

    /// The raw value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Calories {
    type Error = DiaryError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::try_new(u64::from(value))
    }
}

impl From<Calories> for u32 {
    fn from(calories: Calories) -> Self {
        calories.0
    }
}

impl fmt::Display for Calories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kcal", self.0)
    }
}

// =============================================================================
// ENTRY TIMESTAMP (32 bits)
// =============================================================================

/// Caller-supplied entry time, seconds since the Unix epoch, in `[0, 2^32 - 1]`.
///
/// Not checked against the current time: future-dated entries are stored
/// and simply fall outside every window ending at `now`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct EntryTimestamp(u32);

impl EntryTimestamp {
    /// Validate a caller-supplied value.
    pub fn try_new(value: u64) -> Result<Self, DiaryError> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| DiaryError::OutOfRange {
                field: "timestamp",
                value,
                max: MAX_ENTRY_TIMESTAMP,
            })
    }

    /// The raw value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Widened for window arithmetic.
    #[must_use]
    pub const fn as_secs(self) -> u64 {
        self.0 as u64
    }
}

impl From<u32> for EntryTimestamp {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<EntryTimestamp> for u32 {
    fn from(ts: EntryTimestamp) -> Self {
        ts.0
    }
}

// =============================================================================
// WEEKLY COUNTS
// =============================================================================

/// Result of the two-week bucket query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeeklyCounts {
    /// Entries in `[now - 7d, now)`.
    pub last_week: u64,
    /// Entries in `[now - 14d, now - 7d)`.
    pub week_before: u64,
}

impl WeeklyCounts {
    /// Entries counted in either bucket.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.last_week + self.week_before
    }
}
