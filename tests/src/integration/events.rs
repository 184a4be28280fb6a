//! # Notification Flow
//!
//! Appends and threshold changes reach bus subscribers exactly once, after
//! the state they describe is visible.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use food_diary::{
        DiaryConfig, EntryStore, FixedTimeSource, FoodDiaryApi, FoodDiaryService, FoodName,
        InMemoryEntryStore, InMemoryThresholdStore, ThresholdStore,
    };
    use futures::StreamExt;
    use parking_lot::Mutex;
    use shared_bus::{DiaryEvent, EventFilter, EventPublisher, EventTopic};
    use tokio::sync::Semaphore;

    use crate::integration::fixtures::{Harness, ALICE, BOB, NOW};

    /// Publisher that snapshots store state at the moment of publication.
    struct RecordingPublisher {
        entries: Arc<InMemoryEntryStore>,
        thresholds: Arc<InMemoryThresholdStore>,
        seen: Mutex<Vec<(DiaryEvent, usize, u64)>>,
    }

    #[async_trait]
    impl EventPublisher for RecordingPublisher {
        async fn publish(&self, event: DiaryEvent) -> usize {
            let user = event.user();
            let ledger_len = self.entries.len(&user);
            let threshold = self.thresholds.get(&user);
            self.seen.lock().push((event, ledger_len, threshold));
            1
        }

        fn events_published(&self) -> u64 {
            self.seen.lock().len() as u64
        }
    }

    type RecordedDiary =
        FoodDiaryService<InMemoryEntryStore, InMemoryThresholdStore, FixedTimeSource>;

    fn recorded_diary() -> (RecordedDiary, Arc<RecordingPublisher>) {
        let entries = Arc::new(InMemoryEntryStore::new());
        let thresholds = Arc::new(InMemoryThresholdStore::new());
        let publisher = Arc::new(RecordingPublisher {
            entries: Arc::clone(&entries),
            thresholds: Arc::clone(&thresholds),
            seen: Mutex::new(Vec::new()),
        });
        let diary = FoodDiaryService::new(
            DiaryConfig::for_testing(),
            entries,
            thresholds,
            Arc::new(FixedTimeSource::new(NOW)),
            Arc::clone(&publisher) as Arc<dyn EventPublisher>,
        );
        (diary, publisher)
    }

    #[tokio::test]
    async fn test_published_after_state_change() {
        let (diary, publisher) = recorded_diary();
        let admin = diary.admin();

        diary
            .add_food_entry(ALICE, FoodName::new("Banana"), 150, NOW - 60)
            .await
            .unwrap();
        diary
            .add_food_entry(ALICE, FoodName::new("Toast"), 220, NOW - 30)
            .await
            .unwrap();
        diary
            .set_user_daily_calorie_threshold(admin, ALICE, 2200)
            .await
            .unwrap();

        let seen = publisher.seen.lock();
        assert_eq!(seen.len(), 3);
        // The ledger already held the entry when each event went out
        assert_eq!(seen[0].1, 1);
        assert_eq!(seen[1].1, 2);
        // The override was already stored
        assert_eq!(
            seen[2].0,
            DiaryEvent::DailyCalorieThresholdSet {
                user: ALICE,
                value: 2200
            }
        );
        assert_eq!(seen[2].2, 2200);
    }

    #[tokio::test]
    async fn test_no_event_on_failure() {
        let (diary, publisher) = recorded_diary();

        assert!(diary
            .add_food_entry(ALICE, FoodName::new("Cake"), 1 << 24, NOW)
            .await
            .is_err());
        assert!(diary
            .add_food_entry(ALICE, FoodName::new("Cake"), 10, 1 << 32)
            .await
            .is_err());
        assert!(diary
            .set_user_daily_calorie_threshold(BOB, ALICE, 1)
            .await
            .is_err());

        assert_eq!(publisher.events_published(), 0);
    }

    #[tokio::test]
    async fn test_entry_event_payload() {
        let h = Harness::new();
        let mut sub = h.bus.subscribe(EventFilter::all());

        h.diary
            .add_food_entry(ALICE, FoodName::new("Banana"), 150, NOW - 60)
            .await
            .unwrap();

        let mut food_name = [0u8; 32];
        food_name[..6].copy_from_slice(b"Banana");
        assert_eq!(
            sub.recv().await,
            Some(DiaryEvent::FoodEntryAdded {
                user: ALICE,
                food_name,
                calories: 150,
                timestamp: (NOW - 60) as u32,
            })
        );
        assert_eq!(sub.try_recv(), Ok(None));
    }

    #[tokio::test]
    async fn test_filtered_subscriptions() {
        let h = Harness::new();
        let mut thresholds = h.bus.subscribe(EventFilter::topics(vec![EventTopic::Thresholds]));
        let mut bob_only = h.bus.subscribe(EventFilter::for_users(vec![BOB]));

        h.diary
            .add_food_entry(ALICE, FoodName::new("Apple"), 95, NOW - 1)
            .await
            .unwrap();
        h.diary
            .add_food_entry(BOB, FoodName::new("Pear"), 100, NOW - 1)
            .await
            .unwrap();
        h.diary
            .set_user_daily_calorie_threshold(h.admin, ALICE, 1800)
            .await
            .unwrap();

        let event = thresholds.try_recv().unwrap().unwrap();
        assert_eq!(event.topic(), EventTopic::Thresholds);
        assert_eq!(thresholds.try_recv(), Ok(None));

        let event = bob_only.try_recv().unwrap().unwrap();
        assert_eq!(event.user(), BOB);
        assert_eq!(bob_only.try_recv(), Ok(None));
    }

    #[tokio::test]
    async fn test_event_stream_in_append_order() {
        let h = Harness::new();
        let stream = h.bus.event_stream(EventFilter::topics(vec![EventTopic::FoodEntries]));

        for (i, name) in ["Oats", "Rice", "Soup"].into_iter().enumerate() {
            h.diary
                .add_food_entry(ALICE, FoodName::new(name), 100 + i as u64, NOW - 100)
                .await
                .unwrap();
        }

        let calories: Vec<u32> = tokio::time::timeout(
            Duration::from_secs(1),
            stream
                .filter_map(|event| async move {
                    match event {
                        DiaryEvent::FoodEntryAdded { calories, .. } => Some(calories),
                        DiaryEvent::DailyCalorieThresholdSet { .. } => None,
                    }
                })
                .take(3)
                .collect(),
        )
        .await
        .unwrap();

        assert_eq!(calories, vec![100, 101, 102]);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers() {
        let h = Harness::new();
        assert_eq!(h.bus.subscriber_count(), 0);

        h.diary
            .add_food_entry(ALICE, FoodName::new("Tea"), 2, NOW - 1)
            .await
            .unwrap();

        assert_eq!(h.bus.events_published(), 1);
        assert_eq!(h.diary.get_food_entries(ALICE).await.unwrap().len(), 1);
    }

    /// Publisher that holds its first publication until the gate opens.
    struct GatedPublisher {
        gate: Semaphore,
        first: AtomicBool,
        calories: Mutex<Vec<u32>>,
    }

    #[async_trait]
    impl EventPublisher for GatedPublisher {
        async fn publish(&self, event: DiaryEvent) -> usize {
            if self.first.swap(false, Ordering::SeqCst) {
                let _permit = self.gate.acquire().await;
            }
            if let DiaryEvent::FoodEntryAdded { calories, .. } = event {
                self.calories.lock().push(calories);
            }
            1
        }

        fn events_published(&self) -> u64 {
            self.calories.lock().len() as u64
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_event_order_follows_ledger_order() {
        let entries = Arc::new(InMemoryEntryStore::new());
        let publisher = Arc::new(GatedPublisher {
            gate: Semaphore::new(0),
            first: AtomicBool::new(true),
            calories: Mutex::new(Vec::new()),
        });
        let diary = Arc::new(FoodDiaryService::new(
            DiaryConfig::for_testing(),
            Arc::clone(&entries),
            Arc::new(InMemoryThresholdStore::new()),
            Arc::new(FixedTimeSource::new(NOW)),
            Arc::clone(&publisher) as Arc<dyn EventPublisher>,
        ));

        let first = {
            let diary = Arc::clone(&diary);
            tokio::spawn(async move {
                diary
                    .add_food_entry(ALICE, FoodName::new("First"), 1, NOW - 10)
                    .await
            })
        };
        // First entry is in the ledger, its notification is held
        while entries.len(&ALICE) == 0 {
            tokio::task::yield_now().await;
        }

        let second = {
            let diary = Arc::clone(&diary);
            tokio::spawn(async move {
                diary
                    .add_food_entry(ALICE, FoodName::new("Second"), 2, NOW - 5)
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        // The second append waits for the first to finish publishing
        assert_eq!(entries.len(&ALICE), 1);
        assert!(publisher.calories.lock().is_empty());

        publisher.gate.add_permits(1);
        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        let ledger: Vec<u32> = diary
            .get_food_entries(ALICE)
            .await
            .unwrap()
            .iter()
            .map(|e| e.calories().get())
            .collect();
        assert_eq!(ledger, vec![1, 2]);
        assert_eq!(*publisher.calories.lock(), ledger);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_other_users_not_blocked_by_held_publish() {
        let entries = Arc::new(InMemoryEntryStore::new());
        let publisher = Arc::new(GatedPublisher {
            gate: Semaphore::new(0),
            first: AtomicBool::new(true),
            calories: Mutex::new(Vec::new()),
        });
        let diary = Arc::new(FoodDiaryService::new(
            DiaryConfig::for_testing(),
            Arc::clone(&entries),
            Arc::new(InMemoryThresholdStore::new()),
            Arc::new(FixedTimeSource::new(NOW)),
            Arc::clone(&publisher) as Arc<dyn EventPublisher>,
        ));

        let held = {
            let diary = Arc::clone(&diary);
            tokio::spawn(async move {
                diary
                    .add_food_entry(ALICE, FoodName::new("Held"), 1, NOW - 10)
                    .await
            })
        };
        while entries.len(&ALICE) == 0 {
            tokio::task::yield_now().await;
        }

        tokio::time::timeout(
            Duration::from_secs(1),
            diary.add_food_entry(BOB, FoodName::new("Free"), 7, NOW - 10),
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(*publisher.calories.lock(), vec![7]);

        publisher.gate.add_permits(1);
        held.await.unwrap().unwrap();
        assert_eq!(*publisher.calories.lock(), vec![7, 1]);
    }
}
