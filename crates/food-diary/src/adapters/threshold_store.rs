//! In-Memory Threshold Store

use crate::domain::invariants::DEFAULT_DAILY_CALORIE_THRESHOLD;
use crate::ports::outbound::ThresholdStore;
use parking_lot::RwLock;
use shared_types::Address;
use std::collections::HashMap;

/// In-memory per-user threshold overrides.
#[derive(Default)]
pub struct InMemoryThresholdStore {
    thresholds: RwLock<HashMap<Address, u64>>,
}

impl InMemoryThresholdStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ThresholdStore for InMemoryThresholdStore {
    fn get(&self, user: &Address) -> u64 {
        self.thresholds
            .read()
            .get(user)
            .copied()
            .unwrap_or(u64::from(DEFAULT_DAILY_CALORIE_THRESHOLD))
    }

    fn set(&self, user: &Address, value: u64) {
        self.thresholds.write().insert(*user, value);
    }

    fn is_set(&self, user: &Address) -> bool {
        self.thresholds.read().contains_key(user)
    }
}
