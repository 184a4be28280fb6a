//! # Domain Entities
//!
//! The ledger record.

use super::errors::DiaryError;
use super::value_objects::{Calories, EntryTimestamp, FoodName};
use serde::{Deserialize, Serialize};

/// One immutable ledger record.
///
/// Fields are private: an entry is fixed once built and the ledger never
/// hands out mutable access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FoodEntry {
    name: FoodName,
    calories: Calories,
    timestamp: EntryTimestamp,
}

impl FoodEntry {
    /// Build an entry from already-validated fields.
    #[must_use]
    pub const fn new(name: FoodName, calories: Calories, timestamp: EntryTimestamp) -> Self {
        Self {
            name,
            calories,
            timestamp,
        }
    }

    /// Build an entry from caller input, checking field widths.
    ///
    /// Calories are checked before the timestamp.
    pub fn try_new(name: FoodName, calories: u64, timestamp: u64) -> Result<Self, DiaryError> {
        Ok(Self::new(
            name,
            Calories::try_new(calories)?,
            EntryTimestamp::try_new(timestamp)?,
        ))
    }

    /// The food label.
    #[must_use]
    pub const fn name(&self) -> FoodName {
        self.name
    }

    /// The calorie count.
    #[must_use]
    pub const fn calories(&self) -> Calories {
        self.calories
    }

    /// The caller-supplied timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> EntryTimestamp {
        self.timestamp
    }
}
