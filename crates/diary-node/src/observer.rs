//! # Audit Observer
//!
//! Subscribes to the diary bus and writes one structured log line per
//! notification. Stops when the shutdown signal flips or the bus closes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use diary_telemetry::log_event;
use shared_bus::{DiaryEvent, Subscription};
use tokio::sync::watch;

/// Bus observer that logs every event it receives.
pub struct AuditObserver {
    /// Subscription to the diary bus.
    subscription: Subscription,
    /// Events seen so far.
    seen: Arc<AtomicU64>,
}

impl AuditObserver {
    /// Create an observer over a subscription.
    pub fn new(subscription: Subscription) -> Self {
        Self {
            subscription,
            seen: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Shared counter of events seen, readable after `run` consumes `self`.
    pub fn seen_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.seen)
    }

    /// Run the observer loop.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        log_event!(info, "observer", "Audit observer started");

        loop {
            tokio::select! {
                event = self.subscription.recv() => match event {
                    Some(event) => self.record(&event),
                    None => {
                        log_event!(warn, "observer", "Event bus closed");
                        break;
                    }
                },
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        self.drain();
                        break;
                    }
                }
            }
        }

        log_event!(
            info,
            "observer",
            "Audit observer stopped",
            events = self.seen.load(Ordering::Relaxed)
        );
    }

    /// Log whatever is already buffered before stopping.
    fn drain(&mut self) {
        while let Ok(Some(event)) = self.subscription.try_recv() {
            self.record(&event);
        }
    }

    fn record(&self, event: &DiaryEvent) {
        self.seen.fetch_add(1, Ordering::Relaxed);
        log_event!(
            info,
            "observer",
            "Diary event",
            event = %render(event)
        );
    }
}

/// Render an event as a JSON line for log shippers.
pub fn render(event: &DiaryEvent) -> serde_json::Value {
    match event {
        DiaryEvent::FoodEntryAdded {
            user,
            food_name,
            calories,
            timestamp,
        } => serde_json::json!({
            "event_type": "AddFoodEntry",
            "user": format!("0x{}", hex::encode(user.as_bytes())),
            "food_name": format!("0x{}", hex::encode(food_name)),
            "calories": calories,
            "timestamp": timestamp,
        }),
        DiaryEvent::DailyCalorieThresholdSet { user, value } => serde_json::json!({
            "event_type": "DailyCalorieThresholdSet",
            "user": format!("0x{}", hex::encode(user.as_bytes())),
            "value": value,
        }),
    }
}
