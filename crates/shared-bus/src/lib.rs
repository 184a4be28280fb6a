//! # Shared Bus - Event Bus for Diary Notifications
//!
//! Carries notifications emitted by the food diary to anyone building audit
//! trails or derived indexes outside the core.
//!
//! ## Rules
//!
//! - The diary publishes; it never subscribes to its own events.
//! - An event is published only after the state change it describes has
//!   been recorded.
//! - Observers filter by topic and/or by user address.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │  Food Diary  │                    │   Observer   │
//! │              │    publish()       │ (audit log)  │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{DiaryEvent, EventFilter, EventTopic};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, EventSubscriber, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging subscribers drop events.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
