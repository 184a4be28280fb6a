//! Inbound Ports (Driving Ports / API)
//!
//! The diary's public operation surface. Every call carries the caller's
//! identity explicitly; the service authorizes it before touching state.

use crate::domain::entities::FoodEntry;
use crate::domain::errors::DiaryError;
use crate::domain::value_objects::{FoodName, WeeklyCounts};
use async_trait::async_trait;
use shared_types::Address;

/// Primary Food Diary API
#[async_trait]
pub trait FoodDiaryApi: Send + Sync {
    /// Append an entry to the caller's own ledger.
    ///
    /// Fails with `OutOfRange` if `calories` exceeds 24 bits or `timestamp`
    /// exceeds 32 bits. Publishes one `FoodEntryAdded` event on success.
    async fn add_food_entry(
        &self,
        caller: Address,
        name: FoodName,
        calories: u64,
        timestamp: u64,
    ) -> Result<(), DiaryError>;

    /// The caller's full ledger in append order.
    async fn get_food_entries(&self, caller: Address) -> Result<Vec<FoodEntry>, DiaryError>;

    /// Entry counts for the last week and the week before.
    ///
    /// Admin only. Counts the caller's own ledger.
    async fn get_entries_last_two_weeks(&self, caller: Address)
        -> Result<WeeklyCounts, DiaryError>;

    /// Overwrite `user`'s daily calorie threshold. Admin only.
    async fn set_user_daily_calorie_threshold(
        &self,
        caller: Address,
        user: Address,
        value: u64,
    ) -> Result<(), DiaryError>;

    /// `user`'s threshold, or the default if never set. Admin only.
    async fn get_user_daily_calorie_threshold(
        &self,
        caller: Address,
        user: Address,
    ) -> Result<u64, DiaryError>;

    /// Mean calories of `user`'s entries over the last `days_ago` days.
    ///
    /// Admin only. Returns 0 when the window holds no entries.
    async fn get_average_calories(
        &self,
        caller: Address,
        user: Address,
        days_ago: u64,
    ) -> Result<u64, DiaryError>;

    /// Threshold reported for users without an override.
    fn default_daily_calorie_threshold(&self) -> u16;

    /// The admin identity.
    fn admin(&self) -> Address;
}
