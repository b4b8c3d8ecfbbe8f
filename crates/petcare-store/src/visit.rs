//! Vet visit state container.
//!
//! Caches the visits of the most recently fetched pet plus a "currently
//! viewed" visit. The cached order is whatever the server returned; the
//! date-sorted view is computed on demand and leaves the cache untouched.

use std::sync::Arc;

use petcare_client::{ApiClient, NewVisit, VetVisit, VisitPatch};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::StoreResult;

#[derive(Debug, Default)]
struct VisitState {
    visits: Vec<VetVisit>,
    current_visit: Option<VetVisit>,
    loading: bool,
    error: Option<String>,
}

/// State container for vet visits.
#[derive(Clone)]
pub struct VisitStore {
    client: ApiClient,
    state: Arc<RwLock<VisitState>>,
}

impl VisitStore {
    /// Create an empty store over the shared client.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(VisitState::default())),
        }
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Fetch a pet's visits, replacing the cached list.
    pub async fn fetch_for_pet(&self, pet_id: i64) -> StoreResult<Vec<VetVisit>> {
        self.begin().await;
        let result = self.client.list_visits(pet_id).await;
        self.settle(result, |state, visits| {
            state.visits = visits.clone();
            debug!(pet_id, count = visits.len(), "visit list refreshed");
        })
        .await
    }

    /// Fetch one visit and remember it as the currently viewed visit.
    pub async fn fetch_visit(&self, visit_id: i64) -> StoreResult<VetVisit> {
        self.begin().await;
        let result = self.client.get_visit(visit_id).await;
        self.settle(result, |state, visit| {
            state.current_visit = Some(visit.clone());
        })
        .await
    }

    /// Create a visit and append the server's record to the cache.
    pub async fn create(&self, pet_id: i64, visit: &NewVisit) -> StoreResult<VetVisit> {
        self.begin().await;
        let result = self.client.create_visit(pet_id, visit).await;
        self.settle(result, |state, created| {
            state.visits.push(created.clone());
            debug!(visit_id = created.id, "visit added to cache");
        })
        .await
    }

    /// Update a visit, replacing the cached entry (and the currently viewed
    /// visit, when it is the one that changed).
    pub async fn update(&self, visit_id: i64, patch: &VisitPatch) -> StoreResult<VetVisit> {
        self.begin().await;
        let result = self.client.update_visit(visit_id, patch).await;
        self.settle(result, |state, updated| {
            apply_updated(state, updated);
        })
        .await
    }

    /// Delete a visit and drop it from the cache.
    pub async fn delete(&self, visit_id: i64) -> StoreResult<()> {
        self.begin().await;
        let result = self.client.delete_visit(visit_id).await;
        self.settle(result, |state, _| {
            apply_removed(state, visit_id);
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

    /// The cached visit list, in server order.
    pub async fn visits(&self) -> Vec<VetVisit> {
        self.state.read().await.visits.clone()
    }

    /// The currently viewed visit, if one was fetched.
    pub async fn current_visit(&self) -> Option<VetVisit> {
        self.state.read().await.current_visit.clone()
    }

    /// Cached visits belonging to one pet.
    pub async fn visits_for_pet(&self, pet_id: i64) -> Vec<VetVisit> {
        self.state
            .read()
            .await
            .visits
            .iter()
            .filter(|visit| visit.pet_id == pet_id)
            .cloned()
            .collect()
    }

    /// Cached visits sorted most recent first.
    pub async fn visits_by_date_desc(&self) -> Vec<VetVisit> {
        let mut visits = self.state.read().await.visits.clone();
        visits.sort_by(|a, b| b.visit_date.cmp(&a.visit_date));
        visits
    }

    /// Whether the cache holds any visits.
    pub async fn has_visits(&self) -> bool {
        !self.state.read().await.visits.is_empty()
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
        apply: impl FnOnce(&mut VisitState, &T),
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
                warn!(%err, "visit action failed");
                Err(err.into())
            }
        }
    }
}

fn apply_updated(state: &mut VisitState, updated: &VetVisit) {
    if let Some(slot) = state.visits.iter_mut().find(|visit| visit.id == updated.id) {
        *slot = updated.clone();
    }
    if state
        .current_visit
        .as_ref()
        .is_some_and(|visit| visit.id == updated.id)
    {
        state.current_visit = Some(updated.clone());
    }
}

fn apply_removed(state: &mut VisitState, id: i64) {
    state.visits.retain(|visit| visit.id != id);
    if state
        .current_visit
        .as_ref()
        .is_some_and(|visit| visit.id == id)
    {
        state.current_visit = None;
    }
}

// ── tests ────────────────────────────────────────────────────────────
