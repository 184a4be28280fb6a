//! # Diary Container
//!
//! Holds the wired diary: service, event bus and call handler, sharing one
//! set of in-memory stores.

use std::sync::Arc;

use food_diary::{
    DiaryCallHandler, DiaryConfig, FoodDiaryService, InMemoryEntryStore, InMemoryThresholdStore,
    TimeSource,
};
use shared_bus::InMemoryEventBus;
use tracing::info;

/// The in-memory diary service type for a given time source.
pub type InMemoryDiary<C> = FoodDiaryService<InMemoryEntryStore, InMemoryThresholdStore, C>;

/// Container for the wired diary.
pub struct DiaryContainer<C: TimeSource + 'static> {
    /// The diary service.
    pub service: Arc<InMemoryDiary<C>>,
    /// Notification bus the service publishes to.
    pub bus: Arc<InMemoryEventBus>,
    /// Call surface over the service.
    pub handler: DiaryCallHandler<InMemoryDiary<C>>,
}

impl<C: TimeSource + 'static> DiaryContainer<C> {
    /// Wire a fresh diary.
    pub fn new(config: DiaryConfig, clock: Arc<C>) -> Self {
        let capacity = config.event_channel_capacity;
        let (service, bus) = InMemoryDiary::in_memory(config, clock);
        let service = Arc::new(service);
        let handler = DiaryCallHandler::new(Arc::clone(&service));

        info!(event_capacity = capacity, "Diary container initialized");

        Self {
            service,
            bus,
            handler,
        }
    }
}
