//! # Client Session Flow
//!
//! The standard session end to end: a user logs a Banana, the admin queries
//! counts and averages and adjusts the user's threshold.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use diary_node::{run_walkthrough, DiaryNode};
    use food_diary::{
        DiaryCallHandler, DiaryConfig, DiaryRequest, DiaryResponse, FixedTimeSource, FoodDiaryApi,
        FoodName, WeeklyCounts,
    };

    use crate::integration::fixtures::{Harness, ALICE, NOW};

    #[tokio::test]
    async fn test_banana_session() {
        let h = Harness::new();

        // User logs a Banana
        h.diary
            .add_food_entry(ALICE, FoodName::new("Banana"), 150, NOW - 60)
            .await
            .unwrap();

        let entries = h.diary.get_food_entries(ALICE).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name().as_str(), "Banana");
        assert_eq!(entries[0].calories().get(), 150);
        assert_eq!(u64::from(entries[0].timestamp().get()), NOW - 60);

        // Admin reads and adjusts the user's configuration
        assert_eq!(
            h.diary.get_average_calories(h.admin, ALICE, 7).await.unwrap(),
            150
        );
        assert_eq!(
            h.diary
                .get_user_daily_calorie_threshold(h.admin, ALICE)
                .await
                .unwrap(),
            2000
        );
        h.diary
            .set_user_daily_calorie_threshold(h.admin, ALICE, 2200)
            .await
            .unwrap();
        assert_eq!(
            h.diary
                .get_user_daily_calorie_threshold(h.admin, ALICE)
                .await
                .unwrap(),
            2200
        );
        h.diary
            .set_user_daily_calorie_threshold(h.admin, ALICE, 3000)
            .await
            .unwrap();
        assert_eq!(
            h.diary
                .get_user_daily_calorie_threshold(h.admin, ALICE)
                .await
                .unwrap(),
            3000
        );

        // Two-week counts are over the caller's own ledger: the admin has none
        assert_eq!(
            h.diary.get_entries_last_two_weeks(h.admin).await.unwrap(),
            WeeklyCounts::default()
        );
    }

    #[tokio::test]
    async fn test_session_over_call_surface() {
        let h = Harness::new();
        let handler = DiaryCallHandler::new(Arc::clone(&h.diary));

        let calls = vec![
            (
                ALICE,
                DiaryRequest::AddFoodEntry {
                    name: FoodName::new("Banana"),
                    calories: 150,
                    timestamp: NOW - 60,
                },
                DiaryResponse::Ack,
            ),
            (
                h.admin,
                DiaryRequest::GetAverageCalories {
                    user: ALICE,
                    days_ago: 7,
                },
                DiaryResponse::AverageCalories(150),
            ),
            (
                h.admin,
                DiaryRequest::SetUserDailyCalorieThreshold {
                    user: ALICE,
                    value: 2200,
                },
                DiaryResponse::Ack,
            ),
            (
                h.admin,
                DiaryRequest::GetUserDailyCalorieThreshold { user: ALICE },
                DiaryResponse::Threshold(2200),
            ),
            (ALICE, DiaryRequest::Admin, DiaryResponse::Admin(h.admin)),
            (
                ALICE,
                DiaryRequest::DefaultDailyCalorieThreshold,
                DiaryResponse::DefaultThreshold(2000),
            ),
        ];

        for (caller, request, expected) in calls {
            let method = request.method();
            assert_eq!(handler.handle(caller, request).await, Ok(expected), "{method}");
        }
    }

    #[tokio::test]
    async fn test_requests_round_trip_through_json() {
        let h = Harness::new();
        let handler = DiaryCallHandler::new(Arc::clone(&h.diary));

        let wire = serde_json::to_string(&DiaryRequest::AddFoodEntry {
            name: FoodName::new("Banana"),
            calories: 150,
            timestamp: NOW - 60,
        })
        .unwrap();
        let request: DiaryRequest = serde_json::from_str(&wire).unwrap();
        handler.handle(ALICE, request).await.unwrap();

        let response = handler
            .handle(ALICE, DiaryRequest::GetFoodEntries)
            .await
            .unwrap();
        let json = serde_json::to_string(&response).unwrap();
        let back: DiaryResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, response);
    }

    #[tokio::test]
    async fn test_node_walkthrough_end_to_end() {
        let config = DiaryConfig::for_testing();
        let admin = config.admin;
        let mut node = DiaryNode::new(config, Arc::new(FixedTimeSource::new(NOW)));
        node.start();

        let report = run_walkthrough(&node.container().handler, admin, NOW - 60)
            .await
            .unwrap();
        node.shutdown().await;

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.weekly.last_week, 1);
        assert_eq!(report.average_7d, 150);
        assert_eq!(report.threshold, 2200);
        assert_eq!(report.new_threshold, 3000);

        let stats = node.container().service.stats();
        assert_eq!(stats.entries_appended, 1);
        assert_eq!(stats.thresholds_set, 2);
        assert_eq!(stats.rejected_requests(), 0);
    }
}
