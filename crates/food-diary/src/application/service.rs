//! Food Diary Service
//!
//! Main service implementing `FoodDiaryApi`.
//!
//! Every call runs the same pipeline:
//! 1. Authorize the caller against the target
//! 2. Range-check numeric inputs
//! 3. Read or write the stores
//! 4. Publish the notification (writes only, after the write)
//!
//! A failure at any step returns immediately and leaves state untouched.

use crate::adapters::{InMemoryEntryStore, InMemoryThresholdStore};
use crate::algorithms::{average_calories, entries_in_last_two_weeks};
use crate::config::DiaryConfig;
use crate::domain::access::{AccessController, Operation};
use crate::domain::entities::FoodEntry;
use crate::domain::errors::DiaryError;
use crate::domain::invariants::DEFAULT_DAILY_CALORIE_THRESHOLD;
use crate::domain::value_objects::{FoodName, WeeklyCounts};
use crate::ports::inbound::FoodDiaryApi;
use crate::ports::outbound::{EntryStore, ThresholdStore, TimeSource};
use async_trait::async_trait;
use diary_telemetry::{
    metric_inc, HistogramTimer, ACCESS_DENIED, FOOD_ENTRIES_ADDED, OUT_OF_RANGE_REJECTIONS,
    QUERIES_SERVED, QUERY_SCAN_DURATION, THRESHOLD_UPDATES,
};
use parking_lot::Mutex;
use shared_bus::{DiaryEvent, EventPublisher, InMemoryEventBus};
use shared_types::Address;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, instrument, warn};

/// Statistics for the Food Diary Service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Entries appended across all users.
    pub entries_appended: u64,
    /// Threshold writes.
    pub thresholds_set: u64,
    /// Successful read calls.
    pub queries_served: u64,
    /// Calls denied by the access controller.
    pub access_denied: u64,
    /// Calls rejected for out-of-range input.
    pub out_of_range: u64,
}

impl ServiceStats {
    /// All rejected calls.
    pub fn rejected_requests(&self) -> u64 {
        self.access_denied + self.out_of_range
    }
}

/// Live counters behind `ServiceStats`.
#[derive(Debug, Default)]
struct StatsCounters {
    entries_appended: AtomicU64,
    thresholds_set: AtomicU64,
    queries_served: AtomicU64,
    access_denied: AtomicU64,
    out_of_range: AtomicU64,
}

impl StatsCounters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> ServiceStats {
        ServiceStats {
            entries_appended: self.entries_appended.load(Ordering::Relaxed),
            thresholds_set: self.thresholds_set.load(Ordering::Relaxed),
            queries_served: self.queries_served.load(Ordering::Relaxed),
            access_denied: self.access_denied.load(Ordering::Relaxed),
            out_of_range: self.out_of_range.load(Ordering::Relaxed),
        }
    }
}

/// The Food Diary Service.
///
/// Holds no ledger state of its own; the stores own it and serialize access
/// per user, so the service can be shared across tasks behind an `Arc`.
pub struct FoodDiaryService<E: EntryStore, T: ThresholdStore, C: TimeSource> {
    /// Service configuration.
    config: DiaryConfig,
    /// Admin gate, fixed at construction.
    access: AccessController,
    /// Per-user ledgers.
    entries: Arc<E>,
    /// Per-user threshold overrides.
    thresholds: Arc<T>,
    /// Reference time for window queries.
    clock: Arc<C>,
    /// Notification sink.
    publisher: Arc<dyn EventPublisher>,
    /// Service statistics.
    stats: StatsCounters,
    /// Per-user write guards. A store write and its notification happen
    /// under one guard, so each user's events follow ledger order.
    write_locks: Mutex<HashMap<Address, Arc<AsyncMutex<()>>>>,
}

impl<E: EntryStore, T: ThresholdStore, C: TimeSource> FoodDiaryService<E, T, C> {
    /// Create a service over the given adapters.
    pub fn new(
        config: DiaryConfig,
        entries: Arc<E>,
        thresholds: Arc<T>,
        clock: Arc<C>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        info!(admin = %config.admin, "Food diary service created");
        Self {
            access: AccessController::new(config.admin),
            config,
            entries,
            thresholds,
            clock,
            publisher,
            stats: StatsCounters::default(),
            write_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Get current service statistics.
    pub fn stats(&self) -> ServiceStats {
        self.stats.snapshot()
    }

    /// The configuration the service was built with.
    pub fn config(&self) -> &DiaryConfig {
        &self.config
    }

    /// The entry store.
    pub fn entry_store(&self) -> &Arc<E> {
        &self.entries
    }

    /// The threshold store.
    pub fn threshold_store(&self) -> &Arc<T> {
        &self.thresholds
    }

    fn authorize(
        &self,
        caller: &Address,
        target: &Address,
        operation: Operation,
    ) -> Result<(), DiaryError> {
        self.access
            .authorize(caller, target, operation)
            .map_err(|e| self.reject(e))
    }

    /// Record a rejection in logs, metrics and stats, then hand it back.
    fn reject(&self, error: DiaryError) -> DiaryError {
        match &error {
            DiaryError::Forbidden { caller, operation } => {
                warn!(caller = %caller, operation = %operation, "Access denied");
                metric_inc!(ACCESS_DENIED, &[operation.as_str()]);
                StatsCounters::bump(&self.stats.access_denied);
            }
            DiaryError::OutOfRange { field, value, max } => {
                warn!(field = *field, value = *value, max = *max, "Input out of range");
                metric_inc!(OUT_OF_RANGE_REJECTIONS, &[*field]);
                StatsCounters::bump(&self.stats.out_of_range);
            }
        }
        error
    }

    fn record_query(&self, operation: Operation) {
        metric_inc!(QUERIES_SERVED, &[operation.as_str()]);
        StatsCounters::bump(&self.stats.queries_served);
    }

    /// The write guard for `user`'s ledger and threshold.
    fn write_lock(&self, user: &Address) -> Arc<AsyncMutex<()>> {
        Arc::clone(self.write_locks.lock().entry(*user).or_default())
    }
}

impl<C: TimeSource> FoodDiaryService<InMemoryEntryStore, InMemoryThresholdStore, C> {
    /// Wire a service over fresh in-memory stores and a new event bus.
    ///
    /// Returns the bus so callers can subscribe to notifications.
    pub fn in_memory(config: DiaryConfig, clock: Arc<C>) -> (Self, Arc<InMemoryEventBus>) {
        let bus = Arc::new(InMemoryEventBus::with_capacity(
            config.event_channel_capacity,
        ));
        let service = Self::new(
            config,
            Arc::new(InMemoryEntryStore::new()),
            Arc::new(InMemoryThresholdStore::new()),
            clock,
            Arc::clone(&bus) as Arc<dyn EventPublisher>,
        );
        (service, bus)
    }
}

#[async_trait]
impl<E, T, C> FoodDiaryApi for FoodDiaryService<E, T, C>
where
    E: EntryStore + 'static,
    T: ThresholdStore + 'static,
    C: TimeSource + 'static,
{
    #[instrument(level = "debug", skip(self))]
    async fn add_food_entry(
        &self,
        caller: Address,
        name: FoodName,
        calories: u64,
        timestamp: u64,
    ) -> Result<(), DiaryError> {
        self.authorize(&caller, &caller, Operation::AddFoodEntry)?;

        let entry =
            FoodEntry::try_new(name, calories, timestamp).map_err(|e| self.reject(e))?;

        let lock = self.write_lock(&caller);
        let _guard = lock.lock().await;

        self.entries.append(&caller, entry);
        metric_inc!(FOOD_ENTRIES_ADDED);
        StatsCounters::bump(&self.stats.entries_appended);

        info!(
            user = %caller,
            food = %entry.name(),
            calories = entry.calories().get(),
            timestamp = entry.timestamp().get(),
            "Food entry added"
        );

        let receivers = self
            .publisher
            .publish(DiaryEvent::FoodEntryAdded {
                user: caller,
                food_name: entry.name().into(),
                calories: entry.calories().get(),
                timestamp: entry.timestamp().get(),
            })
            .await;
        debug!(receivers, "AddFoodEntry published");

        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_food_entries(&self, caller: Address) -> Result<Vec<FoodEntry>, DiaryError> {
        self.authorize(&caller, &caller, Operation::GetFoodEntries)?;

        let entries = self.entries.list(&caller);
        self.record_query(Operation::GetFoodEntries);
        debug!(user = %caller, count = entries.len(), "Food entries listed");

        Ok(entries)
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_entries_last_two_weeks(
        &self,
        caller: Address,
    ) -> Result<WeeklyCounts, DiaryError> {
        let operation = Operation::GetEntriesLastTwoWeeks;
        self.authorize(&caller, &caller, operation)?;

        let now = self.clock.now();
        let counts = {
            let _timer = HistogramTimer::labelled(&QUERY_SCAN_DURATION, operation.as_str());
            entries_in_last_two_weeks(&self.entries.list(&caller), now)
        };
        self.record_query(operation);

        debug!(
            user = %caller,
            now,
            last_week = counts.last_week,
            week_before = counts.week_before,
            "Two-week counts computed"
        );

        Ok(counts)
    }

    #[instrument(level = "debug", skip(self))]
    async fn set_user_daily_calorie_threshold(
        &self,
        caller: Address,
        user: Address,
        value: u64,
    ) -> Result<(), DiaryError> {
        self.authorize(&caller, &user, Operation::SetUserDailyCalorieThreshold)?;

        let lock = self.write_lock(&user);
        let _guard = lock.lock().await;

        self.thresholds.set(&user, value);
        metric_inc!(THRESHOLD_UPDATES);
        StatsCounters::bump(&self.stats.thresholds_set);

        info!(user = %user, value, "Daily calorie threshold set");

        self.publisher
            .publish(DiaryEvent::DailyCalorieThresholdSet { user, value })
            .await;

        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_user_daily_calorie_threshold(
        &self,
        caller: Address,
        user: Address,
    ) -> Result<u64, DiaryError> {
        self.authorize(&caller, &user, Operation::GetUserDailyCalorieThreshold)?;

        let value = self.thresholds.get(&user);
        self.record_query(Operation::GetUserDailyCalorieThreshold);

        Ok(value)
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_average_calories(
        &self,
        caller: Address,
        user: Address,
        days_ago: u64,
    ) -> Result<u64, DiaryError> {
        let operation = Operation::GetAverageCalories;
        self.authorize(&caller, &user, operation)?;

        let now = self.clock.now();
        let average = {
            let _timer = HistogramTimer::labelled(&QUERY_SCAN_DURATION, operation.as_str());
            average_calories(&self.entries.list(&user), days_ago, now)
        };
        self.record_query(operation);

        debug!(user = %user, days_ago, now, average, "Average calories computed");

        Ok(average)
    }

    fn default_daily_calorie_threshold(&self) -> u16 {
        DEFAULT_DAILY_CALORIE_THRESHOLD
    }

    fn admin(&self) -> Address {
        self.access.admin()
    }
}
