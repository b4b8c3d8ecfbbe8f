//! Feeding schedule state container.
//!
//! Caches the feeding schedules of the most recently fetched pet and wraps
//! the schedule endpoints with the same busy/error bookkeeping as the pet
//! store.

use std::sync::Arc;

use petcare_client::{ApiClient, FeedingSchedule, NewSchedule, SchedulePatch};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::StoreResult;

#[derive(Debug, Default)]
struct ScheduleState {
    schedules: Vec<FeedingSchedule>,
    loading: bool,
    error: Option<String>,
}

/// State container for feeding schedules.
#[derive(Clone)]
pub struct ScheduleStore {
    client: ApiClient,
    state: Arc<RwLock<ScheduleState>>,
}

impl ScheduleStore {
    /// Create an empty store over the shared client.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(ScheduleState::default())),
        }
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Fetch a pet's schedules, replacing the cached list.
    pub async fn fetch_for_pet(&self, pet_id: i64) -> StoreResult<Vec<FeedingSchedule>> {
        self.begin().await;
        let result = self.client.list_schedules(pet_id).await;
        self.settle(result, |state, schedules| {
            state.schedules = schedules.clone();
            debug!(pet_id, count = schedules.len(), "schedule list refreshed");
        })
        .await
    }

    /// Create a schedule and append the server's record to the cache.
    pub async fn create(
        &self,
        pet_id: i64,
        schedule: &NewSchedule,
    ) -> StoreResult<FeedingSchedule> {
        self.begin().await;
        let result = self.client.create_schedule(pet_id, schedule).await;
        self.settle(result, |state, created| {
            state.schedules.push(created.clone());
            debug!(schedule_id = created.id, "schedule added to cache");
        })
        .await
    }

    /// Update a schedule, replacing the cached entry in place.
    pub async fn update(
        &self,
        schedule_id: i64,
        patch: &SchedulePatch,
    ) -> StoreResult<FeedingSchedule> {
        self.begin().await;
        let result = self.client.update_schedule(schedule_id, patch).await;
        self.settle(result, |state, updated| {
            if let Some(slot) = state
                .schedules
                .iter_mut()
                .find(|schedule| schedule.id == updated.id)
            {
                *slot = updated.clone();
            }
        })
        .await
    }

    /// Delete a schedule and drop it from the cache.
    pub async fn delete(&self, schedule_id: i64) -> StoreResult<()> {
        self.begin().await;
        let result = self.client.delete_schedule(schedule_id).await;
        self.settle(result, |state, _| {
            state.schedules.retain(|schedule| schedule.id != schedule_id);
        })
        .await
    }

    /// Clear the error slot.
    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    /// The cached schedule list.
    pub async fn schedules(&self) -> Vec<FeedingSchedule> {
        self.state.read().await.schedules.clone()
    }

    /// Cached schedules belonging to one pet.
    pub async fn schedules_for_pet(&self, pet_id: i64) -> Vec<FeedingSchedule> {
        self.state
            .read()
            .await
            .schedules
            .iter()
            .filter(|schedule| schedule.pet_id == pet_id)
            .cloned()
            .collect()
    }

    /// Whether the cache holds any schedules.
    pub async fn has_schedules(&self) -> bool {
        !self.state.read().await.schedules.is_empty()
    }

    /// Whether an action is in flight.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Message of the most recent failure, if any.
    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    // -----------------------------------------------------------------------
    // Bookkeeping
    // -----------------------------------------------------------------------

    async fn begin(&self) {
        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
    }

    async fn settle<T>(
        &self,
        result: petcare_client::Result<T>,
        apply: impl FnOnce(&mut ScheduleState, &T),
    ) -> StoreResult<T> {
        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(value) => {
                apply(&mut state, &value);
                Ok(value)
            }
            Err(err) => {
                state.error = Some(err.to_string());
                warn!(%err, "schedule action failed");
                Err(err.into())
            }
        }
    }
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn schedule(id: i64, pet_id: i64, food_type: &str) -> FeedingSchedule {
        FeedingSchedule {
            id,
            pet_id,
            food_type: food_type.to_string(),
            amount: Some("200g".to_string()),
            time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            frequency: Some("daily".to_string()),
            notes: None,
            created_at: NaiveDate::from_ymd_opt(2024, 2, 2)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    #[tokio::test]
    async fn schedules_for_pet_filters_by_owner() {
        let store = ScheduleStore::new(ApiClient::new());
        store.state.write().await.schedules = vec![
            schedule(1, 7, "kibble"),
            schedule(2, 7, "wet food"),
            schedule(3, 8, "seeds"),
        ];

        let for_seven = store.schedules_for_pet(7).await;
        assert_eq!(for_seven.len(), 2);
        assert!(for_seven.iter().all(|s| s.pet_id == 7));

        assert!(store.schedules_for_pet(99).await.is_empty());
        assert!(store.has_schedules().await);
    }

    #[tokio::test]
    async fn failed_fetch_records_error_and_clears_busy_flag() {
        let store = ScheduleStore::new(ApiClient::new());

        let result = store.fetch_for_pet(7).await;
        assert!(result.is_err());
        assert!(!store.is_loading().await);
        assert!(store.error().await.is_some());
        assert!(!store.has_schedules().await);
    }

    #[tokio::test]
    async fn validation_failure_surfaces_through_store() {
        let store = ScheduleStore::new(ApiClient::new());
        let empty_food = NewSchedule {
            food_type: String::new(),
            amount: None,
            time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            frequency: None,
            notes: None,
        };

        let result = store.create(7, &empty_food).await;
        assert!(result.is_err());
        assert_eq!(
            store.error().await.as_deref(),
            Some("food_type and time are required")
        );
    }

    #[tokio::test]
    async fn clear_error_resets_slot() {
        let store = ScheduleStore::new(ApiClient::new());
        let _ = store.fetch_for_pet(7).await;
        assert!(store.error().await.is_some());

        store.clear_error().await;
        assert!(store.error().await.is_none());
    }
}
