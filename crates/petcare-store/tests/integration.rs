//! Integration tests for the petcare-store crate.
//!
//! These exercise the stores together over one shared client: session
//! restore from disk, the shared token slot, and the uniform busy/error
//! bookkeeping — all without a live server.

use petcare_client::ApiClient;
use petcare_store::{AuthStore, PetStore, ScheduleStore, TokenFile, VisitStore};

#[tokio::test]
async fn session_restore_flows_into_resource_stores() {
    let dir = tempfile::tempdir().unwrap();
    let tokens = TokenFile::new(dir.path().join("session.json"));
    tokens.save("jwt-persisted").unwrap();

    let client = ApiClient::new();
    let auth = AuthStore::new(client.clone(), tokens);
    assert!(auth.is_authenticated().await);

    // Stores built over the same client see the restored token, so their
    // actions get past the client-side auth gate (and then fail on the
    // missing server, which is fine for this test).
    assert!(client.has_token());
}

#[tokio::test]
async fn logout_gates_every_resource_store() {
    let dir = tempfile::tempdir().unwrap();
    let tokens = TokenFile::new(dir.path().join("session.json"));
    tokens.save("jwt-persisted").unwrap();

    let client = ApiClient::new();
    let auth = AuthStore::new(client.clone(), tokens);
    let pets = PetStore::new(client.clone());
    let schedules = ScheduleStore::new(client.clone());
    let visits = VisitStore::new(client.clone());

    auth.logout().await;

    // Every store now fails client-side with the same message.
    assert!(pets.fetch_pets().await.is_err());
    assert!(schedules.fetch_for_pet(1).await.is_err());
    assert!(visits.fetch_for_pet(1).await.is_err());

    let expected = Some("not authenticated: no access token is set".to_string());
    assert_eq!(pets.error().await, expected);
    assert_eq!(schedules.error().await, expected);
    assert_eq!(visits.error().await, expected);

    // And none of them is left with a stuck busy flag.
    assert!(!pets.is_loading().await);
    assert!(!schedules.is_loading().await);
    assert!(!visits.is_loading().await);
}

#[tokio::test]
async fn store_handles_share_state_across_clones() {
    let client = ApiClient::new();
    let pets = PetStore::new(client);
    let other_handle = pets.clone();

    let _ = pets.fetch_pets().await;
    // The failure recorded through one handle is visible through the other.
    assert!(other_handle.error().await.is_some());

    other_handle.clear_error().await;
    assert!(pets.error().await.is_none());
}

#[tokio::test]
async fn fresh_stores_are_empty_and_idle() {
    let client = ApiClient::new();
    let pets = PetStore::new(client.clone());
    let schedules = ScheduleStore::new(client.clone());
    let visits = VisitStore::new(client);

    assert!(!pets.has_pets().await);
    assert!(pets.current_pet().await.is_none());
    assert!(!schedules.has_schedules().await);
    assert!(!visits.has_visits().await);
    assert!(visits.current_visit().await.is_none());
    assert!(visits.visits_by_date_desc().await.is_empty());
    assert!(!pets.is_loading().await);
    assert!(pets.error().await.is_none());
}
