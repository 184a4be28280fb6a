//! # Food Diary
//!
//! Per-user append-only nutrition ledger with windowed aggregate queries
//! and admin-gated per-user calorie thresholds.
//!
//! ## Architecture
//!
//! - **Domain**: Ledger records, fixed-width value objects, access policy, errors
//! - **Algorithms**: Half-open time windows, two-week counts, N-day average
//! - **Ports**: Inbound (`FoodDiaryApi`) and Outbound (`EntryStore`, `ThresholdStore`, `TimeSource`)
//! - **Adapters**: In-memory stores with per-user locking, system and fixed time sources
//! - **Application**: Service orchestration, statistics, event publication
//! - **IPC**: Request/response payloads and the call handler
//!
//! ## Access Policy
//!
//! | Operation | Who may call |
//! |-----------|--------------|
//! | `add_food_entry`, `get_food_entries` | any caller, own ledger only |
//! | `get_entries_last_two_weeks` | admin (own ledger) |
//! | `set/get_user_daily_calorie_threshold` | admin |
//! | `get_average_calories` | admin |
//! | `default_daily_calorie_threshold`, `admin` | anyone |
//!
//! ## Example
//!
//! ```rust,ignore
//! use food_diary::{DiaryConfig, FoodDiaryApi, FoodDiaryService, FoodName, SystemTimeSource};
//! use std::sync::Arc;
//!
//! let (diary, bus) = FoodDiaryService::in_memory(DiaryConfig::new(admin), Arc::new(SystemTimeSource));
//! diary.add_food_entry(user, FoodName::new("Banana"), 150, now).await?;
//! let counts = diary.get_entries_last_two_weeks(admin).await?;
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ipc;
pub mod ports;

pub use adapters::{FixedTimeSource, InMemoryEntryStore, InMemoryThresholdStore, SystemTimeSource};
pub use application::{FoodDiaryService, ServiceStats};
pub use config::{ConfigError, DiaryConfig};
pub use domain::access::{AccessController, AccessPolicy, Operation};
pub use domain::entities::FoodEntry;
pub use domain::errors::DiaryError;
pub use domain::invariants::{DEFAULT_DAILY_CALORIE_THRESHOLD, MAX_CALORIES, MAX_ENTRY_TIMESTAMP};
pub use domain::value_objects::*;
pub use ipc::{DiaryCallHandler, DiaryRequest, DiaryResponse};
pub use ports::inbound::FoodDiaryApi;
pub use ports::outbound::{EntryStore, ThresholdStore, TimeSource};
