//! # Walkthrough
//!
//! Drives the diary through the standard client session, where the admin
//! also acts as a diary user:
//!
//! 1. `addFoodEntry("Banana", 150, now)`
//! 2. `getFoodEntries()`
//! 3. `getEntriesLastTwoWeeks()`
//! 4. `setUserDailyCalorieThreshold(admin, 2200)`
//! 5. `getAverageCalories(admin, 7)`
//! 6. `getUserDailyCalorieThreshold(admin)`
//! 7. `setUserDailyCalorieThreshold(admin, 3000)` then read it back

use food_diary::{
    DiaryCallHandler, DiaryError, DiaryRequest, DiaryResponse, FoodDiaryApi, FoodEntry, FoodName,
    WeeklyCounts,
};
use shared_types::{Address, UnixTimestamp};
use thiserror::Error;
use tracing::info;

/// Errors that stop a walkthrough.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkthroughError {
    /// The diary rejected a call.
    #[error(transparent)]
    Diary(#[from] DiaryError),

    /// The handler answered with a variant the call cannot produce.
    #[error("Unexpected response to {method}: {response:?}")]
    UnexpectedResponse {
        method: &'static str,
        response: DiaryResponse,
    },
}

/// Values observed during a walkthrough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkthroughReport {
    /// The caller's ledger after the append.
    pub entries: Vec<FoodEntry>,
    /// Two-week counts for the caller.
    pub weekly: WeeklyCounts,
    /// Seven-day average for the caller.
    pub average_7d: u64,
    /// Threshold after the first set.
    pub threshold: u64,
    /// Threshold after the second set.
    pub new_threshold: u64,
}

/// Send one request and unpack the expected response variant.
macro_rules! call {
    ($handler:expr, $caller:expr, $request:expr, $variant:pat => $value:expr) => {{
        let request = $request;
        let method = request.method();
        match $handler.handle($caller, request).await? {
            $variant => $value,
            response => return Err(WalkthroughError::UnexpectedResponse { method, response }),
        }
    }};
}

/// Run the session as `caller` with the entry stamped at `entry_time`.
///
/// Every step goes through the call handler.
pub async fn run_walkthrough<S: FoodDiaryApi>(
    handler: &DiaryCallHandler<S>,
    caller: Address,
    entry_time: UnixTimestamp,
) -> Result<WalkthroughReport, WalkthroughError> {
    // User methods
    call!(
        handler,
        caller,
        DiaryRequest::AddFoodEntry {
            name: FoodName::new("Banana"),
            calories: 150,
            timestamp: entry_time,
        },
        DiaryResponse::Ack => ()
    );

    let entries = call!(
        handler,
        caller,
        DiaryRequest::GetFoodEntries,
        DiaryResponse::FoodEntries(entries) => entries
    );
    for entry in &entries {
        info!(
            food = %entry.name(),
            calories = entry.calories().get(),
            timestamp = entry.timestamp().get(),
            "Food entry"
        );
    }

    // Admin only methods
    let weekly = call!(
        handler,
        caller,
        DiaryRequest::GetEntriesLastTwoWeeks,
        DiaryResponse::WeeklyCounts(counts) => counts
    );
    info!(
        last_week = weekly.last_week,
        week_before = weekly.week_before,
        "Entries in the last two weeks"
    );

    call!(
        handler,
        caller,
        DiaryRequest::SetUserDailyCalorieThreshold {
            user: caller,
            value: 2200,
        },
        DiaryResponse::Ack => ()
    );

    let average_7d = call!(
        handler,
        caller,
        DiaryRequest::GetAverageCalories {
            user: caller,
            days_ago: 7,
        },
        DiaryResponse::AverageCalories(average) => average
    );
    info!(average = average_7d, days = 7, "Average calories");

    let threshold = call!(
        handler,
        caller,
        DiaryRequest::GetUserDailyCalorieThreshold { user: caller },
        DiaryResponse::Threshold(value) => value
    );
    info!(threshold, "Daily calorie threshold");

    call!(
        handler,
        caller,
        DiaryRequest::SetUserDailyCalorieThreshold {
            user: caller,
            value: 3000,
        },
        DiaryResponse::Ack => ()
    );
    let new_threshold = call!(
        handler,
        caller,
        DiaryRequest::GetUserDailyCalorieThreshold { user: caller },
        DiaryResponse::Threshold(value) => value
    );
    info!(threshold = new_threshold, "New daily calorie threshold");

    Ok(WalkthroughReport {
        entries,
        weekly,
        average_7d,
        threshold,
        new_threshold,
    })
}
