//! # Diary Events
//!
//! Defines all event types that flow through the shared bus.
//!
//! Payload fields use the same fixed widths as the ledger records
//! (32-byte name, 24-bit calories stored in a `u32`, 32-bit timestamp) so
//! observers can rebuild entries without depending on the diary crate.

use serde::{Deserialize, Serialize};
use shared_types::Address;

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiaryEvent {
    // =========================================================================
    // LEDGER
    // =========================================================================
    /// A food entry was appended to a user's ledger.
    /// Emitted exactly once per successful append, after the write.
    FoodEntryAdded {
        /// The user whose ledger grew (always the caller).
        user: Address,
        /// Zero-padded food label.
        food_name: [u8; 32],
        /// Calories, at most 2^24 - 1.
        calories: u32,
        /// Caller-supplied timestamp.
        timestamp: u32,
    },

    // =========================================================================
    // CONFIGURATION
    // =========================================================================
    /// The admin set a user's daily calorie threshold.
    DailyCalorieThresholdSet {
        /// The user whose threshold changed.
        user: Address,
        /// The new threshold.
        value: u64,
    },
}

impl DiaryEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::FoodEntryAdded { .. } => EventTopic::FoodEntries,
            Self::DailyCalorieThresholdSet { .. } => EventTopic::Thresholds,
        }
    }

    /// The user the event is about.
    #[must_use]
    pub fn user(&self) -> Address {
        match self {
            Self::FoodEntryAdded { user, .. } | Self::DailyCalorieThresholdSet { user, .. } => {
                *user
            }
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Ledger appends.
    FoodEntries,
    /// Threshold configuration changes.
    Thresholds,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Users to include. Empty means all users.
    pub users: Vec<Address>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            users: Vec::new(),
        }
    }

    /// Create a filter for events about specific users.
    #[must_use]
    pub fn for_users(users: Vec<Address>) -> Self {
        Self {
            topics: Vec::new(),
            users,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &DiaryEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let user_match = self.users.is_empty() || self.users.contains(&event.user());

        topic_match && user_match
    }
}
