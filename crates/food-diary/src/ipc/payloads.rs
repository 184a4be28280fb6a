//! IPC Payloads for the Food Diary
//!
//! One request variant per boundary operation. Payloads carry NO caller
//! identity; the caller is supplied alongside the request by the transport.

use crate::domain::access::Operation;
use crate::domain::entities::FoodEntry;
use crate::domain::value_objects::{FoodName, WeeklyCounts};
use serde::{Deserialize, Serialize};
use shared_types::Address;

// ============================================================
// INCOMING REQUESTS
// ============================================================

/// A call into the diary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum DiaryRequest {
    /// `addFoodEntry(name, calories, timestamp)`
    AddFoodEntry {
        /// Food label.
        name: FoodName,
        /// Calories, checked against 24 bits.
        calories: u64,
        /// Entry time, checked against 32 bits.
        timestamp: u64,
    },
    /// `getFoodEntries()`
    GetFoodEntries,
    /// `getEntriesLastTwoWeeks()`
    GetEntriesLastTwoWeeks,
    /// `setUserDailyCalorieThreshold(user, value)`
    SetUserDailyCalorieThreshold {
        /// Target user.
        user: Address,
        /// New threshold.
        value: u64,
    },
    /// `getUserDailyCalorieThreshold(user)`
    GetUserDailyCalorieThreshold {
        /// Target user.
        user: Address,
    },
    /// `getAverageCalories(user, daysAgo)`
    GetAverageCalories {
        /// Target user.
        user: Address,
        /// Window length in days.
        days_ago: u64,
    },
    /// `DEFAULT_DAILY_CALORIE_THRESHOLD()`
    DefaultDailyCalorieThreshold,
    /// `admin()`
    Admin,
}

impl DiaryRequest {
    /// The gated operation this request performs, if any.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::AddFoodEntry { .. } => Some(Operation::AddFoodEntry),
            Self::GetFoodEntries => Some(Operation::GetFoodEntries),
            Self::GetEntriesLastTwoWeeks => Some(Operation::GetEntriesLastTwoWeeks),
            Self::SetUserDailyCalorieThreshold { .. } => {
                Some(Operation::SetUserDailyCalorieThreshold)
            }
            Self::GetUserDailyCalorieThreshold { .. } => {
                Some(Operation::GetUserDailyCalorieThreshold)
            }
            Self::GetAverageCalories { .. } => Some(Operation::GetAverageCalories),
            Self::DefaultDailyCalorieThreshold | Self::Admin => None,
        }
    }

    /// Name as exposed at the boundary.
    pub fn method(&self) -> &'static str {
        match self {
            Self::DefaultDailyCalorieThreshold => "DEFAULT_DAILY_CALORIE_THRESHOLD",
            Self::Admin => "admin",
            other => other.operation().map_or("unknown", Operation::as_str),
        }
    }

    /// True if the request changes state.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Self::AddFoodEntry { .. } | Self::SetUserDailyCalorieThreshold { .. }
        )
    }
}

// ============================================================
// OUTGOING RESPONSES
// ============================================================

/// The successful result of a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum DiaryResponse {
    /// A write was applied.
    Ack,
    /// The caller's ledger.
    FoodEntries(Vec<FoodEntry>),
    /// Two-week bucket counts.
    WeeklyCounts(WeeklyCounts),
    /// A user's threshold.
    Threshold(u64),
    /// N-day average calories.
    AverageCalories(u64),
    /// The default threshold constant.
    DefaultThreshold(u16),
    /// The admin identity.
    Admin(Address),
}
