//! # petcare-client
//!
//! Typed REST client for the PetCare API.
//!
//! Four endpoint groups: auth, pets, feeding schedules, and vet visits.
//! [`ApiClient`] holds the base URL and a shared bearer-token slot; every
//! operation validates its input client-side before the request leaves the
//! process, and decodes the server's `{"error": "..."}` bodies into typed
//! [`ClientError`] values.
//!
//! ## Quick start
//!
//! ```ignore
//! use petcare_client::ApiClient;
//!
//! let client = ApiClient::with_base_url("http://127.0.0.1:5000/api")?;
//! let auth = client.login("rex_owner", "SecurePass123!").await?;
//! client.set_token(&auth.access_token);
//! let pets = client.list_pets().await?;
//! ```

pub mod client;
pub mod error;
pub mod model;
pub mod validate;

// ── re-exports ───────────────────────────────────────────────────────

pub use client::{ApiClient, AuthResponse};
pub use error::{ClientError, Result};
pub use model::{
    FeedingSchedule, NewPet, NewSchedule, NewVisit, Pet, PetPatch, PhotoFile, SchedulePatch, User,
    VetVisit, VisitPatch,
};
