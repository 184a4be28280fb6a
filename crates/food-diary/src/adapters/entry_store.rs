//! In-Memory Entry Store
//!
//! Implements `EntryStore` with per-user locking: the outer map lock is held
//! only long enough to find or create a ledger, and each ledger carries its
//! own lock. Appends for different users never contend.

use crate::domain::entities::FoodEntry;
use crate::ports::outbound::EntryStore;
use parking_lot::RwLock;
use shared_types::Address;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

type Ledger = Arc<RwLock<Vec<FoodEntry>>>;

/// In-memory ledger storage.
#[derive(Default)]
pub struct InMemoryEntryStore {
    /// user -> ledger. Entries are created lazily on first append.
    ledgers: RwLock<HashMap<Address, Ledger>>,
}

impl InMemoryEntryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with at least one entry.
    pub fn user_count(&self) -> usize {
        self.ledgers.read().len()
    }

    fn ledger(&self, user: &Address) -> Option<Ledger> {
        self.ledgers.read().get(user).cloned()
    }

    fn ledger_or_create(&self, user: &Address) -> Ledger {
        if let Some(ledger) = self.ledger(user) {
            return ledger;
        }
        Arc::clone(self.ledgers.write().entry(*user).or_default())
    }
}

impl EntryStore for InMemoryEntryStore {
    fn append(&self, user: &Address, entry: FoodEntry) {
        let ledger = self.ledger_or_create(user);
        let mut entries = ledger.write();
        entries.push(entry);
        trace!(user = %user, len = entries.len(), "Ledger appended");
    }

    fn list(&self, user: &Address) -> Vec<FoodEntry> {
        self.ledger(user)
            .map(|ledger| ledger.read().clone())
            .unwrap_or_default()
    }

    fn len(&self, user: &Address) -> usize {
        self.ledger(user).map_or(0, |ledger| ledger.read().len())
    }
}
