//! # Window Queries
//!
//! Boundary behaviour of the two-week counts and the N-day average through
//! the service, with the clock moving between calls.

#[cfg(test)]
mod tests {
    use food_diary::{FoodDiaryApi, FoodName, WeeklyCounts};
    use proptest::prelude::*;
    use shared_types::{SECONDS_PER_DAY, SECONDS_PER_WEEK};

    use crate::integration::fixtures::{Harness, ALICE, NOW};

    async fn log(h: &Harness, calories: u64, timestamp: u64) {
        h.diary
            .add_food_entry(h.admin, FoodName::new("Meal"), calories, timestamp)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_bucket_boundaries() {
        let h = Harness::new();

        log(&h, 1, NOW).await; // excluded: end is open
        log(&h, 1, NOW - 1).await; // last week
        log(&h, 1, NOW - SECONDS_PER_WEEK).await; // last week: start is closed
        log(&h, 1, NOW - SECONDS_PER_WEEK - 1).await; // week before
        log(&h, 1, NOW - 2 * SECONDS_PER_WEEK).await; // week before
        log(&h, 1, NOW - 2 * SECONDS_PER_WEEK - 1).await; // too old

        assert_eq!(
            h.diary.get_entries_last_two_weeks(h.admin).await.unwrap(),
            WeeklyCounts {
                last_week: 2,
                week_before: 2
            }
        );
    }

    #[tokio::test]
    async fn test_counts_follow_the_clock() {
        let h = Harness::new();
        log(&h, 100, NOW - 60).await;

        let counts = h.diary.get_entries_last_two_weeks(h.admin).await.unwrap();
        assert_eq!(counts.last_week, 1);

        h.clock.advance(SECONDS_PER_WEEK);
        let counts = h.diary.get_entries_last_two_weeks(h.admin).await.unwrap();
        assert_eq!(
            counts,
            WeeklyCounts {
                last_week: 0,
                week_before: 1
            }
        );

        h.clock.advance(SECONDS_PER_WEEK);
        assert_eq!(
            h.diary.get_entries_last_two_weeks(h.admin).await.unwrap(),
            WeeklyCounts::default()
        );
    }

    #[tokio::test]
    async fn test_future_entries_stored_but_not_counted() {
        let h = Harness::new();
        log(&h, 500, NOW + SECONDS_PER_DAY).await;

        assert_eq!(h.diary.get_food_entries(h.admin).await.unwrap().len(), 1);
        assert_eq!(
            h.diary.get_entries_last_two_weeks(h.admin).await.unwrap(),
            WeeklyCounts::default()
        );
        assert_eq!(
            h.diary.get_average_calories(h.admin, h.admin, 30).await.unwrap(),
            0
        );

        // Counted once the clock passes it
        h.clock.advance(SECONDS_PER_DAY + 1);
        assert_eq!(
            h.diary.get_average_calories(h.admin, h.admin, 1).await.unwrap(),
            500
        );
    }

    #[tokio::test]
    async fn test_average_window() {
        let h = Harness::new();

        for (calories, age) in [(100, 1), (200, 3600), (300, SECONDS_PER_DAY - 1)] {
            h.diary
                .add_food_entry(ALICE, FoodName::new("Meal"), calories, NOW - age)
                .await
                .unwrap();
        }
        h.diary
            .add_food_entry(ALICE, FoodName::new("Feast"), 5000, NOW - 3 * SECONDS_PER_DAY)
            .await
            .unwrap();

        assert_eq!(
            h.diary.get_average_calories(h.admin, ALICE, 1).await.unwrap(),
            200
        );
        // (100 + 200 + 300 + 5000) / 4
        assert_eq!(
            h.diary.get_average_calories(h.admin, ALICE, 7).await.unwrap(),
            1400
        );
        assert_eq!(
            h.diary.get_average_calories(h.admin, ALICE, 0).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_near_epoch_clock() {
        let h = Harness::at(3600);
        log(&h, 250, 0).await;
        log(&h, 350, 1800).await;

        assert_eq!(
            h.diary.get_entries_last_two_weeks(h.admin).await.unwrap(),
            WeeklyCounts {
                last_week: 2,
                week_before: 0
            }
        );
        assert_eq!(
            h.diary.get_average_calories(h.admin, h.admin, u64::MAX).await.unwrap(),
            300
        );
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// The service's counts equal a direct count over the listed ledger.
        #[test]
        fn prop_counts_match_listed_entries(
            ages in prop::collection::vec(0u64..3 * SECONDS_PER_WEEK, 0..40),
        ) {
            let rt = runtime();
            let (counts, listed) = rt.block_on(async {
                let h = Harness::new();
                for age in &ages {
                    log(&h, 10, NOW - age).await;
                }
                (
                    h.diary.get_entries_last_two_weeks(h.admin).await.unwrap(),
                    h.diary.get_food_entries(h.admin).await.unwrap(),
                )
            });

            prop_assert_eq!(listed.len(), ages.len());
            let expected_a = ages.iter().filter(|&&a| (1..=SECONDS_PER_WEEK).contains(&a)).count() as u64;
            let expected_b = ages
                .iter()
                .filter(|&&a| (SECONDS_PER_WEEK + 1..=2 * SECONDS_PER_WEEK).contains(&a))
                .count() as u64;
            prop_assert_eq!(counts.last_week, expected_a);
            prop_assert_eq!(counts.week_before, expected_b);
        }

        /// Appending never changes the existing prefix of the ledger.
        #[test]
        fn prop_append_only(calories in prop::collection::vec(0u64..=16_777_215, 1..30)) {
            let rt = runtime();
            rt.block_on(async {
                let h = Harness::new();
                let mut previous = Vec::new();
                for (i, c) in calories.iter().enumerate() {
                    log(&h, *c, NOW - i as u64).await;
                    let current = h.diary.get_food_entries(h.admin).await.unwrap();
                    assert_eq!(current.len(), previous.len() + 1);
                    assert!(current.starts_with(&previous));
                    previous = current;
                }
            });
        }
    }
}
