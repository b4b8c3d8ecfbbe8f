//! Pet state container.
//!
//! Caches the user's pet list plus a "currently viewed" pet, and wraps the
//! pet endpoints with busy/error bookkeeping. The cached list only changes
//! from server responses: create appends the returned record, update
//! replaces the matching entry in place, delete removes it.

use std::sync::Arc;

use petcare_client::{ApiClient, NewPet, Pet, PetPatch};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::StoreResult;

#[derive(Debug, Default)]
struct PetState {
    pets: Vec<Pet>,
    current_pet: Option<Pet>,
    loading: bool,
    error: Option<String>,
}

/// State container for the user's pets.
#[derive(Clone)]
pub struct PetStore {
    client: ApiClient,
    state: Arc<RwLock<PetState>>,
}

impl PetStore {
    /// Create an empty store over the shared client.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(PetState::default())),
        }
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Fetch all pets, replacing the cached list.
    pub async fn fetch_pets(&self) -> StoreResult<Vec<Pet>> {
        self.begin().await;
        let result = self.client.list_pets().await;
        self.settle(result, |state, pets| {
            state.pets = pets.clone();
            debug!(count = pets.len(), "pet list refreshed");
        })
        .await
    }

    /// Fetch one pet and remember it as the currently viewed pet.
    pub async fn fetch_pet(&self, id: i64) -> StoreResult<Pet> {
        self.begin().await;
        let result = self.client.get_pet(id).await;
        self.settle(result, |state, pet| {
            state.current_pet = Some(pet.clone());
        })
        .await
    }

    /// Create a pet and append the server's record to the cached list.
    pub async fn create_pet(&self, pet: &NewPet) -> StoreResult<Pet> {
        self.begin().await;
        let result = self.client.create_pet(pet).await;
        self.settle(result, |state, created| {
            apply_created(state, created);
            debug!(pet_id = created.id, "pet added to cache");
        })
        .await
    }

    /// Update a pet, replacing the cached entry (and the currently viewed
    /// pet, when it is the one that changed).
    pub async fn update_pet(&self, id: i64, patch: &PetPatch) -> StoreResult<Pet> {
        self.begin().await;
        let result = self.client.update_pet(id, patch).await;
        self.settle(result, |state, updated| {
            apply_updated(state, updated);
        })
        .await
    }

    /// Delete a pet and drop it from the cache.
    pub async fn delete_pet(&self, id: i64) -> StoreResult<()> {
        self.begin().await;
        let result = self.client.delete_pet(id).await;
        self.settle(result, |state, _| {
            apply_removed(state, id);
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

    /// The cached pet list.
    pub async fn pets(&self) -> Vec<Pet> {
        self.state.read().await.pets.clone()
    }

    /// The currently viewed pet, if one was fetched.
    pub async fn current_pet(&self) -> Option<Pet> {
        self.state.read().await.current_pet.clone()
    }

    /// Look up a cached pet by ID.
    pub async fn pet_by_id(&self, id: i64) -> Option<Pet> {
        self.state
            .read()
            .await
            .pets
            .iter()
            .find(|pet| pet.id == id)
            .cloned()
    }

    /// Whether the cache holds any pets.
    pub async fn has_pets(&self) -> bool {
        !self.state.read().await.pets.is_empty()
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
        apply: impl FnOnce(&mut PetState, &T),
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
                warn!(%err, "pet action failed");
                Err(err.into())
            }
        }
    }
}

fn apply_created(state: &mut PetState, created: &Pet) {
    state.pets.push(created.clone());
}

fn apply_updated(state: &mut PetState, updated: &Pet) {
    if let Some(slot) = state.pets.iter_mut().find(|pet| pet.id == updated.id) {
        *slot = updated.clone();
    }
    if state
        .current_pet
        .as_ref()
        .is_some_and(|pet| pet.id == updated.id)
    {
        state.current_pet = Some(updated.clone());
    }
}

fn apply_removed(state: &mut PetState, id: i64) {
    state.pets.retain(|pet| pet.id != id);
    if state.current_pet.as_ref().is_some_and(|pet| pet.id == id) {
        state.current_pet = None;
    }
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn pet(id: i64, name: &str) -> Pet {
        Pet {
            id,
            name: name.to_string(),
            species: "dog".to_string(),
            breed: None,
            age: Some(3),
            weight: Some(20.0),
            photo_url: None,
            tags: vec![],
            notes: None,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            user_id: 1,
        }
    }

    // -- cache mutation rules --

    #[test]
    fn created_pet_is_appended() {
        let mut state = PetState::default();
        apply_created(&mut state, &pet(1, "Rex"));
        apply_created(&mut state, &pet(2, "Misu"));
        assert_eq!(state.pets.len(), 2);
        assert_eq!(state.pets[1].name, "Misu");
    }

    #[test]
    fn updated_pet_replaces_entry_in_place() {
        let mut state = PetState::default();
        state.pets = vec![pet(1, "Rex"), pet(2, "Misu")];

        let mut renamed = pet(2, "Misu");
        renamed.name = "Miso".to_string();
        apply_updated(&mut state, &renamed);

        assert_eq!(state.pets.len(), 2);
        assert_eq!(state.pets[1].name, "Miso");
        assert_eq!(state.pets[0].name, "Rex");
    }

    #[test]
    fn updated_pet_refreshes_current_pet_only_on_match() {
        let mut state = PetState::default();
        state.pets = vec![pet(1, "Rex"), pet(2, "Misu")];
        state.current_pet = Some(pet(1, "Rex"));

        let mut other = pet(2, "Misu");
        other.name = "Miso".to_string();
        apply_updated(&mut state, &other);
        assert_eq!(state.current_pet.as_ref().unwrap().name, "Rex");

        let mut same = pet(1, "Rex");
        same.name = "Rexy".to_string();
        apply_updated(&mut state, &same);
        assert_eq!(state.current_pet.as_ref().unwrap().name, "Rexy");
    }

    #[test]
    fn updated_pet_not_in_cache_is_ignored() {
        let mut state = PetState::default();
        state.pets = vec![pet(1, "Rex")];
        apply_updated(&mut state, &pet(99, "Ghost"));
        assert_eq!(state.pets.len(), 1);
        assert_eq!(state.pets[0].name, "Rex");
    }

    #[test]
    fn removed_pet_is_dropped_and_current_cleared() {
        let mut state = PetState::default();
        state.pets = vec![pet(1, "Rex"), pet(2, "Misu")];
        state.current_pet = Some(pet(1, "Rex"));

        apply_removed(&mut state, 1);
        assert_eq!(state.pets.len(), 1);
        assert!(state.current_pet.is_none());

        // Removing the other pet leaves current_pet (already None) alone.
        state.current_pet = Some(pet(2, "Misu"));
        apply_removed(&mut state, 99);
        assert!(state.current_pet.is_some());
    }

    // -- getters --

    #[tokio::test]
    async fn pet_by_id_and_has_pets() {
        let store = PetStore::new(ApiClient::new());
        assert!(!store.has_pets().await);
        assert!(store.pet_by_id(1).await.is_none());

        store.state.write().await.pets = vec![pet(1, "Rex"), pet(2, "Misu")];
        assert!(store.has_pets().await);
        assert_eq!(store.pet_by_id(2).await.unwrap().name, "Misu");
        assert!(store.pet_by_id(3).await.is_none());
    }

    // -- busy/error bookkeeping --

    #[tokio::test]
    async fn failed_fetch_records_error_and_clears_busy_flag() {
        // No token on the client, so the action fails before any request.
        let store = PetStore::new(ApiClient::new());

        let result = store.fetch_pets().await;
        assert!(result.is_err());
        assert!(!store.is_loading().await);
        assert_eq!(
            store.error().await.as_deref(),
            Some("not authenticated: no access token is set")
        );
        assert!(!store.has_pets().await);
    }

    #[tokio::test]
    async fn new_action_clears_previous_error() {
        let store = PetStore::new(ApiClient::new());
        let _ = store.fetch_pets().await;
        assert!(store.error().await.is_some());

        store.begin().await;
        assert!(store.error().await.is_none());
        assert!(store.is_loading().await);
    }

    #[tokio::test]
    async fn clear_error_resets_slot() {
        let store = PetStore::new(ApiClient::new());
        let _ = store.fetch_pets().await;
        store.clear_error().await;
        assert!(store.error().await.is_none());
    }

    #[tokio::test]
    async fn validation_failure_surfaces_through_store() {
        let store = PetStore::new(ApiClient::new());
        let result = store.create_pet(&NewPet::default()).await;
        assert!(result.is_err());
        assert_eq!(
            store.error().await.as_deref(),
            Some("Name and species are required")
        );
    }
}
