//! # petcare-store
//!
//! State containers for the PetCare client.
//!
//! Each store caches one resource group in memory and wraps the matching
//! [`petcare_client::ApiClient`] endpoints with uniform bookkeeping: a busy
//! flag that is true exactly while an action is in flight, an error slot
//! holding the most recent failure message, and cache mutation driven only
//! by server responses. Stores are `Clone` and share their state, so one
//! handle can drive actions while another renders snapshots.
//!
//! ## Quick start
//!
//! ```ignore
//! use petcare_client::ApiClient;
//! use petcare_store::{AuthStore, PetStore, TokenFile};
//!
//! let client = ApiClient::new();
//! let auth = AuthStore::new(client.clone(), TokenFile::new(".petcare/session.json"));
//! let pets = PetStore::new(client.clone());
//!
//! auth.login("rex_owner", "SecurePass123!").await?;
//! let all = pets.fetch_pets().await?;
//! ```

pub mod auth;
pub mod error;
pub mod pet;
pub mod schedule;
pub mod token;
pub mod visit;

// ── re-exports ───────────────────────────────────────────────────────

pub use auth::AuthStore;
pub use error::{StoreError, StoreResult};
pub use pet::PetStore;
pub use schedule::ScheduleStore;
pub use token::TokenFile;
pub use visit::VisitStore;
