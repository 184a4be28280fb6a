//! IPC Handler for the Food Diary
//!
//! Dispatches a `DiaryRequest` from an identified caller to the
//! `FoodDiaryApi`. Authorization stays in the service; the handler only
//! translates payloads and records call outcomes.

use crate::domain::errors::DiaryError;
use crate::ipc::payloads::{DiaryRequest, DiaryResponse};
use crate::ports::inbound::FoodDiaryApi;
use diary_telemetry::diary_span;
use shared_types::Address;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn, Instrument};

/// IPC Handler for the Food Diary.
pub struct DiaryCallHandler<S: FoodDiaryApi> {
    service: Arc<S>,
}

impl<S: FoodDiaryApi> DiaryCallHandler<S> {
    /// Create a handler over a shared service.
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }

    /// The wrapped service.
    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    /// Handle one call from `caller`.
    pub async fn handle(
        &self,
        caller: Address,
        request: DiaryRequest,
    ) -> Result<DiaryResponse, DiaryError> {
        let start_time = Instant::now();
        let method = request.method();

        let span = diary_span!("diary_call", caller = %caller, method);
        let result = self.dispatch(caller, request).instrument(span).await;
        let elapsed_us = start_time.elapsed().as_micros() as u64;

        match &result {
            Ok(_) => debug!(caller = %caller, method, elapsed_us, "Call handled"),
            Err(e) => warn!(caller = %caller, method, error = %e, "Call rejected"),
        }

        result
    }

    async fn dispatch(
        &self,
        caller: Address,
        request: DiaryRequest,
    ) -> Result<DiaryResponse, DiaryError> {
        let service = &self.service;

        let response = match request {
            DiaryRequest::AddFoodEntry {
                name,
                calories,
                timestamp,
            } => {
                service
                    .add_food_entry(caller, name, calories, timestamp)
                    .await?;
                DiaryResponse::Ack
            }
            DiaryRequest::GetFoodEntries => {
                DiaryResponse::FoodEntries(service.get_food_entries(caller).await?)
            }
            DiaryRequest::GetEntriesLastTwoWeeks => {
                DiaryResponse::WeeklyCounts(service.get_entries_last_two_weeks(caller).await?)
            }
            DiaryRequest::SetUserDailyCalorieThreshold { user, value } => {
                service
                    .set_user_daily_calorie_threshold(caller, user, value)
                    .await?;
                DiaryResponse::Ack
            }
            DiaryRequest::GetUserDailyCalorieThreshold { user } => DiaryResponse::Threshold(
                service.get_user_daily_calorie_threshold(caller, user).await?,
            ),
            DiaryRequest::GetAverageCalories { user, days_ago } => DiaryResponse::AverageCalories(
                service.get_average_calories(caller, user, days_ago).await?,
            ),
            DiaryRequest::DefaultDailyCalorieThreshold => {
                DiaryResponse::DefaultThreshold(service.default_daily_calorie_threshold())
            }
            DiaryRequest::Admin => DiaryResponse::Admin(service.admin()),
        };

        Ok(response)
    }
}
